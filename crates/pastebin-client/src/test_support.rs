use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pastebin_common::{CreatePasteRequest, Paste, PasteStatus};
use tokio::sync::Notify;

use crate::api_client::PasteApi;
use crate::error::{PasteError, Result};

enum Entry {
    Paste {
        paste: Paste,
        password: Option<String>,
    },
    Status {
        status: u16,
        message: String,
    },
}

/// Records `id` as cancelled if dropped while still armed.
struct CancelGuard<'a> {
    cancelled: &'a Mutex<Vec<String>>,
    id: &'a str,
    armed: bool,
}

impl Drop for CancelGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.cancelled.lock().unwrap().push(self.id.to_string());
        }
    }
}

/// A recorded `get_paste` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCall {
    pub id: String,
    pub password: Option<String>,
}

/// In-memory stand-in for the paste server.
#[derive(Default)]
pub struct FakeApi {
    entries: Mutex<HashMap<String, Entry>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    get_calls: Mutex<Vec<GetCall>>,
    cancelled: Mutex<Vec<String>>,
    created: Mutex<Vec<CreatePasteRequest>>,
    create_error: Mutex<Option<PasteError>>,
    next_id: AtomicU64,
}

pub fn sample_paste(id: &str, content: &str) -> Paste {
    Paste {
        id: id.to_string(),
        content: content.to_string(),
        max_views: 1,
        current_views: 1,
        expires_at: None,
        status: PasteStatus::Active,
        created_at: "2024-05-01T10:00:00Z".to_string(),
        updated_at: "2024-05-01T10:00:00Z".to_string(),
    }
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, id: &str, content: &str) {
        self.entries.lock().unwrap().insert(
            id.to_string(),
            Entry::Paste {
                paste: sample_paste(id, content),
                password: None,
            },
        );
    }

    pub fn insert_protected(&self, id: &str, content: &str, password: &str) {
        self.entries.lock().unwrap().insert(
            id.to_string(),
            Entry::Paste {
                paste: sample_paste(id, content),
                password: Some(password.to_string()),
            },
        );
    }

    pub fn insert_status(&self, id: &str, status: u16, message: &str) {
        self.entries.lock().unwrap().insert(
            id.to_string(),
            Entry::Status {
                status,
                message: message.to_string(),
            },
        );
    }

    pub fn fail_create_with(&self, err: PasteError) {
        *self.create_error.lock().unwrap() = Some(err);
    }

    /// Hold `get_paste` calls for `id` until [`FakeApi::release`] is called.
    pub fn hold(&self, id: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(id.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, id: &str) {
        if let Some(gate) = self.gates.lock().unwrap().remove(id) {
            gate.notify_one();
        }
    }

    pub fn get_calls(&self) -> Vec<GetCall> {
        self.get_calls.lock().unwrap().clone()
    }

    /// Identifiers whose `get_paste` future was dropped before finishing.
    pub fn cancelled(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<CreatePasteRequest> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl PasteApi for FakeApi {
    async fn create_paste(&self, request: &CreatePasteRequest) -> Result<Paste> {
        self.created.lock().unwrap().push(request.clone());
        if let Some(err) = self.create_error.lock().unwrap().take() {
            return Err(err);
        }
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = format!("paste{n}");
        let mut paste = sample_paste(&id, &request.content);
        paste.max_views = request.max_views;
        paste.current_views = 0;
        paste.expires_at = request.expires_at.clone();
        self.entries.lock().unwrap().insert(
            id,
            Entry::Paste {
                paste: paste.clone(),
                password: request.password.clone(),
            },
        );
        Ok(paste)
    }

    async fn get_paste(&self, id: &str, password: Option<&str>) -> Result<Paste> {
        self.get_calls.lock().unwrap().push(GetCall {
            id: id.to_string(),
            password: password.map(str::to_string),
        });

        let gate = self.gates.lock().unwrap().get(id).cloned();
        if let Some(gate) = gate {
            let mut pending = CancelGuard {
                cancelled: &self.cancelled,
                id,
                armed: true,
            };
            gate.notified().await;
            pending.armed = false;
        }

        let entries = self.entries.lock().unwrap();
        match entries.get(id) {
            None => Err(PasteError::Api {
                message: "Paste not found".into(),
                status: 404,
            }),
            Some(Entry::Status { status, message }) => Err(PasteError::Api {
                message: message.clone(),
                status: *status,
            }),
            Some(Entry::Paste {
                paste,
                password: expected,
            }) => match (expected, password) {
                (None, _) => Ok(paste.clone()),
                (Some(expected), Some(given)) if expected == given => Ok(paste.clone()),
                (Some(_), Some(_)) => Err(PasteError::Api {
                    message: "Incorrect password".into(),
                    status: 401,
                }),
                (Some(_), None) => Err(PasteError::Api {
                    message: "Password required".into(),
                    status: 401,
                }),
            },
        }
    }
}
