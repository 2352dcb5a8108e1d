use std::sync::Arc;

use tandem_core::SingleChatService;
use tandem_db::SqliteSingleStore;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub chats: SingleChatService<SqliteSingleStore>,
}
