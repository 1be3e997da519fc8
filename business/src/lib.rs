pub mod application {
    pub mod bootstrap {
        pub mod initialize;
        pub mod shared_database;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod auth {
        pub mod errors;
        pub mod model;
        pub mod services;
    }
    pub mod bootstrap {
        pub mod errors;
        pub mod services;
        pub mod use_cases {
            pub mod initialize;
        }
    }
    pub mod credentials {
        pub mod errors;
        pub mod model;
        pub mod source;
    }
    pub mod database {
        pub mod document;
        pub mod path;
        pub mod repository;
    }
}
