//! Scripted ledger — deterministic existence lookups for tests.

use layermap_ledger::{Existence, LedgerClient, LedgerError};
use layermap_types::{AccountInfo, Identity};
use std::collections::HashMap;
use std::sync::Mutex;

/// A ledger whose responses are scripted per identity.
///
/// Each identity gets a queue of responses consumed in order; once the queue
/// is down to one entry, that entry repeats forever. Identities without a
/// script get the default response. Every call is counted, so tests can
/// assert that local validation short-circuits before any lookup happens.
pub struct ScriptedLedger {
    scripts: Mutex<HashMap<Identity, Vec<Result<Existence, LedgerError>>>>,
    default: Result<Existence, LedgerError>,
    calls: Mutex<u64>,
}

impl ScriptedLedger {
    /// Every unscripted identity gets `default`.
    pub fn new(default: Result<Existence, LedgerError>) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            default,
            calls: Mutex::new(0),
        }
    }

    /// A ledger on which every identity exists with the given balance.
    pub fn always_found(balance: u64) -> Self {
        Self::new(Ok(Existence::Found(AccountInfo {
            balance,
            valid_for_tick: None,
        })))
    }

    /// A ledger on which no identity exists.
    pub fn always_not_found() -> Self {
        Self::new(Ok(Existence::NotFound))
    }

    /// A ledger that always fails the same way.
    pub fn always_err(err: LedgerError) -> Self {
        Self::new(Err(err))
    }

    /// Script a fixed response for one identity.
    pub fn respond(self, identity: Identity, response: Result<Existence, LedgerError>) -> Self {
        self.respond_seq(identity, vec![response])
    }

    /// Script a sequence of responses for one identity (last one repeats).
    pub fn respond_seq(
        self,
        identity: Identity,
        responses: Vec<Result<Existence, LedgerError>>,
    ) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(identity, responses);
        self
    }

    /// Total number of lookups issued so far.
    pub fn call_count(&self) -> u64 {
        *self.calls.lock().unwrap()
    }
}

impl LedgerClient for ScriptedLedger {
    async fn exists(&self, identity: &Identity) -> Result<Existence, LedgerError> {
        *self.calls.lock().unwrap() += 1;
        let mut scripts = self.scripts.lock().unwrap();
        match scripts.get_mut(identity) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) => queue[0].clone(),
            None => self.default.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(c: char) -> Identity {
        Identity::parse(c.to_string().repeat(Identity::LEN)).unwrap()
    }

    #[tokio::test]
    async fn default_response_and_call_counting() {
        let ledger = ScriptedLedger::always_not_found();
        assert_eq!(ledger.exists(&id('A')).await, Ok(Existence::NotFound));
        assert_eq!(ledger.exists(&id('B')).await, Ok(Existence::NotFound));
        assert_eq!(ledger.call_count(), 2);
    }

    #[tokio::test]
    async fn scripted_sequence_then_repeats() {
        let ledger = ScriptedLedger::always_not_found().respond_seq(
            id('A'),
            vec![
                Err(LedgerError::RateLimited),
                Ok(Existence::Found(AccountInfo {
                    balance: 5,
                    valid_for_tick: None,
                })),
            ],
        );

        assert_eq!(ledger.exists(&id('A')).await, Err(LedgerError::RateLimited));
        let found = ledger.exists(&id('A')).await.unwrap();
        assert!(matches!(found, Existence::Found(info) if info.balance == 5));
        // Last entry repeats.
        assert!(matches!(ledger.exists(&id('A')).await, Ok(Existence::Found(_))));
    }
}
