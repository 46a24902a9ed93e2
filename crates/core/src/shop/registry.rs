//! Hosting several isolated shop sessions in one process.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{catalog::Catalog, wallet::WalletLedger};

use super::ShopSession;

/// Opaque handle for a session hosted by a [`SessionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Thread-safe table of isolated shop sessions sharing one catalog.
pub struct SessionRegistry {
    catalog: Arc<Catalog>,
    starting_balance: f64,
    default_quantity_kg: u32,
    next_id: AtomicU64,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<ShopSession>>>>,
}

impl SessionRegistry {
    /// Sessions opened here share `catalog` and start from the given balance and quantity.
    pub fn new(catalog: Arc<Catalog>, starting_balance: f64, default_quantity_kg: u32) -> Self {
        Self {
            catalog,
            starting_balance,
            default_quantity_kg,
            next_id: AtomicU64::new(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Start a fresh session with an empty selection and the starting balance.
    pub fn open(&self) -> SessionId {
        let id = SessionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let session = ShopSession::new(
            Arc::clone(&self.catalog),
            WalletLedger::new(self.starting_balance),
        )
        .with_default_quantity(self.default_quantity_kg);
        self.sessions.write().insert(id, Arc::new(Mutex::new(session)));
        info!(%id, "Session opened");
        id
    }

    /// Run `f` against the session, or return `None` if it is not open.
    pub fn with_session<R>(&self, id: SessionId, f: impl FnOnce(&mut ShopSession) -> R) -> Option<R> {
        let session = self.sessions.read().get(&id).cloned()?;
        let mut guard = session.lock();
        Some(f(&mut guard))
    }

    /// Drop a session. Returns whether it was open.
    pub fn close(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            info!(%id, "Session closed");
        }
        removed
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
