use axum::{
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use common::error::TechdocError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::warn;
use types::user::{AuthInfo, CurrentUserResp, LoginReq, RegistrationReq, UpdatePassword};

use crate::AppResult;

// TODO: load the signing secret from the config file instead.
const SECRET: &str = "techdoc-jwt-signing-secret";

const BAD_CREDENTIALS: &str = "Email ou mot de passe incorrect !";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub name: String,
    #[serde(with = "jwt_numeric_date")]
    iat: OffsetDateTime,
    #[serde(with = "jwt_numeric_date")]
    exp: OffsetDateTime,
}

impl Claims {
    pub fn new(sub: String, name: String, iat: OffsetDateTime, exp: OffsetDateTime) -> Self {
        // normalize the timestamps by stripping of microseconds
        let iat = iat
            .date()
            .with_hms_milli(iat.hour(), iat.minute(), iat.second(), 0)
            .unwrap()
            .assume_utc();
        let exp = exp
            .date()
            .with_hms_milli(exp.hour(), exp.minute(), exp.second(), 0)
            .unwrap()
            .assume_utc();

        Self {
            sub,
            name,
            iat,
            exp,
        }
    }
}

mod jwt_numeric_date {
    //! Custom serialization of OffsetDateTime to conform with the JWT spec (RFC 7519 section 2, "Numeric Date")
    use serde::{self, Deserialize, Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S>(date: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let timestamp = date.unix_timestamp();
        serializer.serialize_i64(timestamp)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        OffsetDateTime::from_unix_timestamp(i64::deserialize(deserializer)?)
            .map_err(|_| serde::de::Error::custom("invalid Unix timestamp value"))
    }
}

pub async fn registration(Json(req): Json<RegistrationReq>) -> AppResult<()> {
    let existing = storage::user::read_by_email(&req.email)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    if existing.is_some() {
        return Err(
            TechdocError::Common("Un compte existe déjà pour cet email !".to_owned()).into(),
        );
    }

    let hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    storage::user::insert(&common::get_id(), req.name, req.email, hash)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    Ok(())
}

pub async fn login(Json(req): Json<LoginReq>) -> AppResult<Json<AuthInfo>> {
    let user = storage::user::read_by_email(&req.email)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .ok_or_else(|| TechdocError::Common(BAD_CREDENTIALS.to_owned()))?;

    let valid = bcrypt::verify(&req.password, &user.password)
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    if !valid {
        return Err(TechdocError::Common(BAD_CREDENTIALS.to_owned()).into());
    }

    let iat = OffsetDateTime::now_utc();
    let exp = iat + Duration::hours(2);
    let claims = Claims::new(user.id, user.name, iat, exp);

    let header = Header {
        kid: Some("signing_key".to_owned()),
        alg: Algorithm::HS512,
        ..Default::default()
    };
    let token = encode(&header, &claims, &EncodingKey::from_secret(SECRET.as_ref()))
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    Ok(Json(AuthInfo { token }))
}

pub async fn me(Extension(claims): Extension<Claims>) -> AppResult<Json<CurrentUserResp>> {
    let user = storage::user::read_by_id(&claims.sub)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .ok_or(TechdocError::Unauthorized)?;

    Ok(Json(CurrentUserResp {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}

pub async fn password(
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdatePassword>,
) -> AppResult<()> {
    let user = storage::user::read_by_id(&claims.sub)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?
        .ok_or(TechdocError::Unauthorized)?;

    let valid = bcrypt::verify(&req.password, &user.password)
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    if !valid {
        return Err(TechdocError::Common("Mot de passe incorrect !".to_owned()).into());
    }

    let hash = bcrypt::hash(&req.new_password, bcrypt::DEFAULT_COST)
        .map_err(|e| TechdocError::Common(e.to_string()))?;
    storage::user::update_password(&user.id, hash)
        .await
        .map_err(|e| TechdocError::Common(e.to_string()))?;

    Ok(())
}

pub async fn auth(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = match headers.get("Authorization") {
        Some(t) => t.to_str().or(Err(StatusCode::UNAUTHORIZED))?,
        None => return Err(StatusCode::UNAUTHORIZED),
    };
    let token = token.strip_prefix("Bearer ").unwrap_or(token);
    let token_data = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(SECRET.as_ref()),
        &Validation::new(Algorithm::HS512),
    ) {
        Ok(c) => c,
        Err(e) => {
            warn!("{:?}", e);
            return Err(StatusCode::UNAUTHORIZED);
        }
    };

    request.extensions_mut().insert(token_data.claims);
    let response = next.run(request).await;
    Ok(response)
}
