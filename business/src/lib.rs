pub mod application {
    pub mod cart {
        pub mod store;
        pub mod verify_coupon;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart {
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod storage;
        pub mod value_objects;
        pub mod use_cases {
            pub mod verify_coupon;
        }
    }
}
