use dotenvy::dotenv;
use lazy_static::lazy_static;
use secrecy::Secret;
use std::env as std_env;

lazy_static! {
    pub static ref STORE_BACKEND: String =
        load_or_default(env::STORE_BACKEND_ENV_VAR, DEFAULT_STORE_BACKEND);
    pub static ref DATA_FILE: String =
        load_or_default(env::DATA_FILE_ENV_VAR, DEFAULT_DATA_FILE);
    pub static ref APP_ADDRESS: String =
        load_or_default(env::APP_ADDRESS_ENV_VAR, prod::APP_ADDRESS);
    pub static ref DATABASE_URL: Secret<String> = get_db_url();
}

fn load_env() {
    dotenv().ok();
}

fn get_db_url() -> Secret<String> {
    load_env();
    let db_url = std_env::var(env::DATABASE_URL_ENV_VAR)
        .expect("DATABASE_URL must be set.");
    if db_url.is_empty() {
        panic!("DATABASE_URL must not be empty.");
    }
    Secret::new(db_url)
}

fn load_or_default(variable_name: &str, default_value: &str) -> String {
    load_env();

    match std_env::var(variable_name) {
        Ok(value) => {
            if value.is_empty() {
                String::from(default_value)
            } else {
                value
            }
        }
        Err(_) => String::from(default_value),
    }
}

pub mod env {
    pub const APP_ADDRESS_ENV_VAR: &str = "APP_ADDRESS";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const DATA_FILE_ENV_VAR: &str = "DATA_FILE";
    pub const STORE_BACKEND_ENV_VAR: &str = "STORE_BACKEND";
}

pub const DEFAULT_STORE_BACKEND: &str = "memory";
pub const DEFAULT_DATA_FILE: &str = "data/camps.json";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
