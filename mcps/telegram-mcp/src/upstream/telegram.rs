//! Telegram source over MTProto
//!
//! Reads history as a regular user account via `grammers`, which is only
//! compiled with the `mtproto` feature. Without it, every connection attempt
//! fails with [`UpstreamError::Unavailable`], which callers see as an error
//! envelope rather than a crash.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{MessageSource, SourceSession};
use crate::config::Config;
use crate::types::UpstreamError;

/// Flood waits shorter than this many seconds are slept through transparently
#[cfg_attr(not(feature = "mtproto"), allow(dead_code))]
const FLOOD_SLEEP_THRESHOLD: u32 = 10;

/// Telegram user-account source
#[derive(Clone)]
#[cfg_attr(not(feature = "mtproto"), allow(dead_code))]
pub struct TelegramSource {
    api_id: i32,
    api_hash: String,
    session_path: PathBuf,
    // The session file is single-writer; one connection at a time.
    lock: Arc<Mutex<()>>,
}

impl TelegramSource {
    pub fn new(config: &Config) -> Self {
        Self {
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            session_path: config.session_path.clone(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    #[cfg(feature = "mtproto")]
    async fn open_session(&self) -> Result<Box<dyn SourceSession>, UpstreamError> {
        let guard = self.lock.clone().lock_owned().await;
        let session = mtproto::MtprotoSession::connect(self, guard).await?;
        Ok(Box::new(session))
    }

    #[cfg(not(feature = "mtproto"))]
    async fn open_session(&self) -> Result<Box<dyn SourceSession>, UpstreamError> {
        Err(UpstreamError::Unavailable(
            "telegram-mcp was built without the `mtproto` feature".to_string(),
        ))
    }
}

#[async_trait]
impl MessageSource for TelegramSource {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn connect(&self) -> Result<Box<dyn SourceSession>, UpstreamError> {
        self.open_session().await
    }
}

/// How a source identifier addresses a chat
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(not(feature = "mtproto"), allow(dead_code))]
enum SourceRef<'a> {
    Username(&'a str),
    /// Bare chat id, with any `-`/`-100` marker removed
    Id(i64),
}

#[cfg_attr(not(feature = "mtproto"), allow(dead_code))]
impl<'a> SourceRef<'a> {
    /// `None` for numeric ids with no positive counterpart
    fn parse(source: &'a str) -> Option<Self> {
        let source = source.trim();

        if let Ok(marked) = source.parse::<i64>() {
            let id = match source.strip_prefix("-100") {
                Some(rest) if !rest.is_empty() => rest.parse::<i64>().ok(),
                _ => marked.checked_abs(),
            };
            return id.map(SourceRef::Id);
        }

        let name = ["https://t.me/", "http://t.me/", "t.me/"]
            .iter()
            .find_map(|prefix| source.strip_prefix(prefix))
            .map(|rest| rest.split('/').next().unwrap_or(rest))
            .unwrap_or(source);

        Some(SourceRef::Username(name.trim_start_matches('@')))
    }
}

#[cfg(feature = "mtproto")]
mod mtproto {
    use std::path::PathBuf;

    use async_trait::async_trait;
    use grammers_client::types::Chat;
    use grammers_client::{Client, Config as ClientConfig, InitParams};
    use grammers_session::Session;
    use tokio::sync::OwnedMutexGuard;

    use super::{SourceRef, TelegramSource, FLOOD_SLEEP_THRESHOLD};
    use crate::types::UpstreamError;
    use crate::upstream::{RawMessage, RawTimestamp, SourceSession};

    fn transport(err: impl std::fmt::Display) -> UpstreamError {
        UpstreamError::Transport(err.to_string())
    }

    pub(super) struct MtprotoSession {
        client: Client,
        session_path: PathBuf,
        _guard: OwnedMutexGuard<()>,
    }

    impl MtprotoSession {
        pub(super) async fn connect(
            source: &TelegramSource,
            guard: OwnedMutexGuard<()>,
        ) -> Result<Self, UpstreamError> {
            let session = Session::load_file_or_create(&source.session_path).map_err(|e| {
                UpstreamError::Unavailable(format!(
                    "cannot open session file {}: {}",
                    source.session_path.display(),
                    e
                ))
            })?;

            let client = Client::connect(ClientConfig {
                session,
                api_id: source.api_id,
                api_hash: source.api_hash.clone(),
                params: InitParams {
                    flood_sleep_threshold: FLOOD_SLEEP_THRESHOLD,
                    ..Default::default()
                },
            })
            .await
            .map_err(transport)?;

            if !client.is_authorized().await.map_err(transport)? {
                return Err(UpstreamError::Unauthorized);
            }

            Ok(Self {
                client,
                session_path: source.session_path.clone(),
                _guard: guard,
            })
        }

        async fn resolve(&self, source: &str) -> Result<Chat, UpstreamError> {
            let reference = SourceRef::parse(source)
                .ok_or_else(|| UpstreamError::UnresolvedSource(source.to_string()))?;
            match reference {
                SourceRef::Username(name) => self
                    .client
                    .resolve_username(name)
                    .await
                    .map_err(transport)?
                    .ok_or_else(|| UpstreamError::UnresolvedSource(source.to_string())),
                SourceRef::Id(id) => {
                    // Numeric ids carry no access hash; find them among the account's dialogs.
                    let mut dialogs = self.client.iter_dialogs();
                    while let Some(dialog) = dialogs.next().await.map_err(transport)? {
                        if dialog.chat().id() == id {
                            return Ok(dialog.chat().clone());
                        }
                    }
                    Err(UpstreamError::UnresolvedSource(source.to_string()))
                }
            }
        }
    }

    #[async_trait]
    impl SourceSession for MtprotoSession {
        async fn fetch_recent(
            &mut self,
            source: &str,
            limit: usize,
        ) -> Result<Vec<RawMessage>, UpstreamError> {
            let chat = self.resolve(source).await?;

            let mut history = self.client.iter_messages(chat.pack()).limit(limit);
            let mut fetched = Vec::with_capacity(limit);
            while let Some(message) = history.next().await.map_err(transport)? {
                fetched.push(RawMessage {
                    id: i64::from(message.id()),
                    timestamp: RawTimestamp::Aware(message.date().fixed_offset()),
                    text: Some(message.text().to_string()),
                });
            }

            Ok(fetched)
        }

        async fn close(self: Box<Self>) {
            if let Err(e) = self.client.session().save_to_file(&self.session_path) {
                tracing::warn!(
                    "Failed to save session to {}: {}",
                    self.session_path.display(),
                    e
                );
            }
        }
    }
}
