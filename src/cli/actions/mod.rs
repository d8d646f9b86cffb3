use secrecy::SecretString;

pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        dsn: String,
        origin: String,
        static_dir: String,
        relay_url: Option<String>,
        relay_api_key: Option<SecretString>,
        email_from: Option<String>,
        email_from_name: Option<String>,
        code_ttl_seconds: i64,
    },
}
