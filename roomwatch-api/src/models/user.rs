use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    #[serde(rename = "userID")]
    pub user_id: String,
    /// First name
    pub name: String,
    /// Last name
    pub surname: String,
    /// Contact email
    pub email: String,
    /// Chat used by the notification bot
    #[serde(rename = "telegramChatID")]
    pub telegram_chat_id: i64,
    /// Rooms the user follows
    pub rooms: Vec<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "telegramChatID")]
    pub telegram_chat_id: Option<i64>,
    pub rooms: Option<Vec<String>>,
}
