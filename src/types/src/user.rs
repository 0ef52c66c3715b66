use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct RegistrationReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthInfo {
    pub token: String,
}

#[derive(Serialize)]
pub struct CurrentUserResp {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct UpdatePassword {
    pub password: String,
    pub new_password: String,
}
