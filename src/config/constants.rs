use std::time::Duration;

pub const GREETING_MESSAGE: &str = "Hello! I'm ResQ AI, your emergency care assistant. I can analyze your uploaded hospital files and provide guidance on protocols, drug calculations, medical references, and emergency procedures. Upload files in the Files tab and ask me questions based on your hospital's specific protocols.";

/// Assistant text used when the backend answers with an empty body
pub const NO_RESPONSE_MESSAGE: &str = "No response from AI.";

/// Lower-cased marker the backend emits when retrieval finds nothing
pub const NO_DETAILS_MARKER: &str = "no details found";

pub const DEFAULT_BASE_URL: &str = "https://ai-chatbot-production-2636.up.railway.app";

pub const DEFAULT_AUTH_URL: &str = "https://devswissapi.alleshealth.com";

pub const LOG_FILE_PATH: &str = "/tmp/resq.log";

/// Overrides the configured log filters, `env_logger` syntax
pub const LOG_ENV: &str = "RESQ_LOG";

/// Bundled syntect theme used for code fences
pub const THEME_NAME: &str = "base16-ocean.dark";

pub const SESSION_FILE_PATH: &str = "${HOME}/.resq/session.json";

pub const UNDER_CONSTRUCTION: &str = "This page is under construction.";

pub const FRAME_DURATION: Duration = Duration::from_millis(1000 / 30);

pub const BUBBLE_WIDTH_PERCENT: usize = 75; // 75% of the chat area width
