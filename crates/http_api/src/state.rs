use rand::RngCore;

use app_api::AppContext;

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub service_token: String,
}

impl HttpState {
    pub fn new(context: AppContext, service_token: String) -> Self {
        Self {
            context,
            service_token,
        }
    }
}

pub fn generate_service_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
