use awsig_core::time::{format_date, DateTime};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::RwLock;

/// The full validity scope of a derived signing key.
///
/// A key is only reusable when every one of these matches; in particular
/// the date stamp, so a UTC date rollover never resurrects yesterday's key.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
struct CacheKey {
    access_key_id: String,
    region: String,
    service: String,
    date_stamp: String,
}

/// A cache for derived signing keys.
///
/// Key derivation runs four HMAC stages; callers signing many requests for
/// the same scope can share one of these through
/// [`RequestSigner::with_signing_key_cache`](crate::RequestSigner::with_signing_key_cache).
/// Safe to share across tasks.
pub struct SigningKeyCache {
    keys: RwLock<HashMap<CacheKey, Vec<u8>>>,
}

impl SigningKeyCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a signing key for the given scope.
    pub fn get(
        &self,
        access_key_id: &str,
        region: &str,
        service: &str,
        date_stamp: &str,
    ) -> Option<Vec<u8>> {
        let key = CacheKey {
            access_key_id: access_key_id.to_string(),
            region: region.to_string(),
            service: service.to_string(),
            date_stamp: date_stamp.to_string(),
        };

        self.keys
            .read()
            .expect("lock poisoned")
            .get(&key)
            .cloned()
    }

    /// Store a signing key for the given scope, replacing any existing one.
    pub fn put(
        &self,
        access_key_id: &str,
        region: &str,
        service: &str,
        date_stamp: &str,
        signing_key: Vec<u8>,
    ) {
        let key = CacheKey {
            access_key_id: access_key_id.to_string(),
            region: region.to_string(),
            service: service.to_string(),
            date_stamp: date_stamp.to_string(),
        };

        self.keys
            .write()
            .expect("lock poisoned")
            .insert(key, signing_key);
    }

    /// Drop every entry whose date stamp is not the given time's date.
    ///
    /// Keeps the cache bounded across date rollovers in long-running
    /// processes.
    pub fn evict_expired(&self, now: DateTime) {
        let today = format_date(now);
        self.keys
            .write()
            .expect("lock poisoned")
            .retain(|k, _| k.date_stamp == today);
    }

    /// Drop every entry, e.g. after a credential rotation.
    pub fn clear(&self) {
        self.keys.write().expect("lock poisoned").clear();
    }

    /// Number of cached keys.
    pub fn len(&self) -> usize {
        self.keys.read().expect("lock poisoned").len()
    }

    /// Whether the cache holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SigningKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SigningKeyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyCache")
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_put_and_get() {
        let cache = SigningKeyCache::new();
        assert!(cache.is_empty());

        cache.put("AKID", "us-east-1", "iam", "20150830", vec![1, 2, 3]);
        assert_eq!(
            cache.get("AKID", "us-east-1", "iam", "20150830"),
            Some(vec![1, 2, 3])
        );
        assert_eq!(cache.get("AKID", "us-west-2", "iam", "20150830"), None);
        assert_eq!(cache.get("AKID", "us-east-1", "iam", "20150831"), None);
    }

    #[test]
    fn test_put_replaces() {
        let cache = SigningKeyCache::new();
        cache.put("AKID", "us-east-1", "iam", "20150830", vec![1]);
        cache.put("AKID", "us-east-1", "iam", "20150830", vec![2]);

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get("AKID", "us-east-1", "iam", "20150830"),
            Some(vec![2])
        );
    }

    #[test]
    fn test_scope_components_are_distinct_entries() {
        let cache = SigningKeyCache::new();
        cache.put("AKID", "us-east-1", "iam", "20150830", vec![1]);
        cache.put("AKID", "us-east-1", "sts", "20150830", vec![2]);
        cache.put("AKID2", "us-east-1", "iam", "20150830", vec![3]);

        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_evict_expired_keeps_today_only() {
        let cache = SigningKeyCache::new();
        cache.put("AKID", "us-east-1", "iam", "20150829", vec![1]);
        cache.put("AKID", "us-east-1", "iam", "20150830", vec![2]);
        cache.put("AKID", "us-east-1", "iam", "20150831", vec![3]);

        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 0, 0).unwrap();
        cache.evict_expired(now);

        assert_eq!(cache.len(), 1);
        assert!(cache.get("AKID", "us-east-1", "iam", "20150830").is_some());
    }

    #[test]
    fn test_clear() {
        let cache = SigningKeyCache::new();
        cache.put("AKID", "us-east-1", "iam", "20150830", vec![1]);
        cache.clear();
        assert!(cache.is_empty());
    }
}
