pub mod user_list_response;
pub mod users;
