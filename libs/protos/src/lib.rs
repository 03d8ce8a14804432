// @generated
// Wires up the buf-generated GPCore API code under `proto/`.
// Each prost file include!()s its tonic companion.

pub mod gpcore {
    pub mod api {
        pub mod admin {
            pub mod v1 {
                include!("generated/gpcore/api/admin/v1/gpcore.api.admin.v1.rs");
            }
        }
        pub mod auth {
            pub mod v1 {
                include!("generated/gpcore/api/auth/v1/gpcore.api.auth.v1.rs");
            }
        }
        pub mod cloud {
            pub mod v2 {
                include!("generated/gpcore/api/cloud/v2/gpcore.api.cloud.v2.rs");
            }
        }
        pub mod gateway {
            pub mod v1 {
                include!("generated/gpcore/api/gateway/v1/gpcore.api.gateway.v1.rs");
            }
        }
        pub mod metadata {
            pub mod v1 {
                include!("generated/gpcore/api/metadata/v1/gpcore.api.metadata.v1.rs");
            }
        }
        pub mod network {
            pub mod v1 {
                include!("generated/gpcore/api/network/v1/gpcore.api.network.v1.rs");
            }
        }
        pub mod payment {
            pub mod v1 {
                include!("generated/gpcore/api/payment/v1/gpcore.api.payment.v1.rs");
            }
        }
    }
}
