use std::{
    collections::{HashMap, HashSet},
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use ielts_engine::{
    FinishedResult, Level, RecommendationStore, Skill, StoreError, StreakState, StreakStore,
    TestSummary,
};
use uuid::Uuid;

/// In-memory stand-in for the PostgreSQL store
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, StreakState>>,
    results: Mutex<Vec<(Uuid, FinishedResult, bool)>>,
    tests: Mutex<Vec<TestSummary>>,
    fail: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, state: StreakState) -> Uuid {
        let id = Uuid::new_v4();
        self.users.lock().unwrap().insert(id, state);
        id
    }

    pub fn add_test(&self, test_type: Skill, level: Level) -> Uuid {
        let id = Uuid::new_v4();
        self.tests.lock().unwrap().push(TestSummary {
            id,
            title: format!("{test_type} ({level})"),
            test_type,
            level,
        });
        id
    }

    pub fn add_result(&self, user_id: Uuid, test_id: Uuid, band_score: f64, finished: bool) {
        let test_type = self
            .tests
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == test_id)
            .map(|t| t.test_type)
            .expect("result must reference a known test");

        self.results.lock().unwrap().push((
            user_id,
            FinishedResult {
                test_id,
                test_type,
                band_score,
            },
            finished,
        ));
    }

    pub fn streak(&self, user_id: Uuid) -> StreakState {
        self.users.lock().unwrap()[&user_id]
    }

    /// Make every subsequent call fail
    pub fn fail_from_now_on(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::new(std::io::Error::other("connection reset")));
        }
        Ok(())
    }
}

impl RecommendationStore for MemoryStore {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.users.lock().unwrap().contains_key(&user_id))
    }

    async fn finished_results(&self, user_id: Uuid) -> Result<Vec<FinishedResult>, StoreError> {
        self.check()?;
        Ok(self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|(owner, _, finished)| *owner == user_id && *finished)
            .map(|(_, result, _)| *result)
            .collect())
    }

    async fn tests_excluding(&self, test_ids: &[Uuid]) -> Result<Vec<TestSummary>, StoreError> {
        self.check()?;
        let excluded: HashSet<&Uuid> = test_ids.iter().collect();
        Ok(self
            .tests
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !excluded.contains(&t.id))
            .cloned()
            .collect())
    }
}

impl StreakStore for MemoryStore {
    async fn find_streak(&self, user_id: Uuid) -> Result<Option<StreakState>, StoreError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(&user_id).copied())
    }

    async fn update_streak_with<F>(
        &self,
        user_id: Uuid,
        apply: F,
    ) -> Result<Option<StreakState>, StoreError>
    where
        F: FnOnce(&StreakState) -> Option<StreakState> + Send,
    {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        let Some(state) = users.get_mut(&user_id) else {
            return Ok(None);
        };

        if let Some(next) = apply(state) {
            *state = next;
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(Some(*state))
    }
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}
