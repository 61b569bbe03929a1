//! 会话存储
//!
//! 会话由本地存储中的 Token 与用户名两个键组成，`is_authenticated`
//! 完全由 Token 是否存在决定。所有写入都经过这里。

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::protocol::{LoginRequest, RegisterRequest};
use crate::storage::KeyValueStore;
use crate::validation;
use crate::{AuthResponse, STORAGE_TOKEN_KEY, STORAGE_USERNAME_KEY, Session};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct SessionStore<C, S> {
    api: ApiClient<C, S>,
}

impl<C: HttpClient, S: KeyValueStore> SessionStore<C, S> {
    pub fn new(api: ApiClient<C, S>) -> Self {
        Self { api }
    }

    /// 登录并持久化会话
    ///
    /// # Errors
    /// - `Validation`: 用户名或密码为空（不会发出请求）
    /// - `Auth`: 后端拒绝
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<Session> {
        validation::validate_login(username, password)?;

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.api.execute(&request).await?;
        Ok(self.persist(response))
    }

    /// 注册并直接进入登录状态
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<Session> {
        validation::validate_registration(username, email, password)?;

        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.execute(&request).await?;
        Ok(self.persist(response))
    }

    /// 清除会话；未登录时调用也是安全的
    pub fn logout(&self) {
        let store = self.api.store();
        let removed = store.delete(STORAGE_TOKEN_KEY) & store.delete(STORAGE_USERNAME_KEY);
        if !removed {
            warn!("failed to clear persisted session");
        }
        info!("session cleared");
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.api.token()
    }

    /// 未登录时为空字符串
    pub fn username(&self) -> String {
        self.api
            .store()
            .get(STORAGE_USERNAME_KEY)
            .unwrap_or_default()
    }

    pub fn session(&self) -> Option<Session> {
        self.token().map(|token| Session {
            token,
            username: self.username(),
        })
    }

    fn persist(&self, response: AuthResponse) -> Session {
        let session = response.into_session();
        let store = self.api.store();
        let saved = store.set(STORAGE_TOKEN_KEY, &session.token)
            & store.set(STORAGE_USERNAME_KEY, &session.username);
        if !saved {
            warn!(username = %session.username, "failed to persist session");
        }
        info!(username = %session.username, "session started");
        session
    }
}

#[cfg(test)]
mod tests;
