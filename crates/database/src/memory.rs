//! Process-local backend. Every mutation holds the single write lock for
//! its whole check-then-update, which gives the same per-user atomicity
//! the MongoDB backend gets from conditional updates and unique indexes.

use crate::{
    bonus_claim::{
        model::BonusClaim,
        repository::{already_claimed, user_not_found, BonusClaimRepositoryTrait},
    },
    counter::{STUDENT_SEQUENCE, USER_SEQUENCE},
    reward::{
        model::{BonusReward, RewardTier},
        repository::RewardRepositoryTrait,
    },
    student::{
        model::{Student, StudentResult},
        repository::StudentRepositoryTrait,
    },
    user::{
        model::{ClaimGuard, DailyClaimUpdate, NewUser, User},
        repository::UserRepositoryTrait,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};
use tokio::sync::RwLock;
use utils::AppResult;
use validator::Validate;

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    tiers: BTreeMap<u32, RewardTier>,
    bonuses: Vec<BonusReward>,
    bonus_claims: Vec<BonusClaim>,
    students: BTreeMap<i64, Student>,
    results: BTreeMap<(i64, String), StudentResult>,
    sequences: HashMap<&'static str, i64>,
}

impl MemoryState {
    fn next_sequence(&mut self, name: &'static str) -> i64 {
        let seq = self.sequences.entry(name).or_insert(0);
        *seq += 1;
        *seq
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryDatabase {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepositoryTrait for MemoryDatabase {
    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> AppResult<User> {
        user.validate()?;

        let mut state = self.state.write().await;
        let id = state.next_sequence(USER_SEQUENCE);

        let user = User {
            id,
            name: user.name,
            role: user.role,
            coins: user.coins,
            gems: user.gems,
            current_streak: user.current_streak,
            last_claim_date: None,
        };
        state.users.insert(id, user.clone());

        Ok(user)
    }

    async fn count_users(&self) -> AppResult<u64> {
        Ok(self.state.read().await.users.len() as u64)
    }

    async fn apply_daily_claim(
        &self,
        id: i64,
        guard: ClaimGuard,
        update: DailyClaimUpdate,
    ) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;

        match state.users.get_mut(&id) {
            Some(user) if user.guard() == guard => {
                update.apply_to(user);
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl RewardRepositoryTrait for MemoryDatabase {
    async fn get_tier(&self, day_number: u32) -> AppResult<Option<RewardTier>> {
        Ok(self.state.read().await.tiers.get(&day_number).cloned())
    }

    async fn get_bonus(&self, bonus_type: &str) -> AppResult<Option<BonusReward>> {
        let state = self.state.read().await;

        Ok(state.bonuses.iter().find(|b| b.bonus_type == bonus_type).cloned())
    }

    async fn list_bonuses(&self) -> AppResult<Vec<BonusReward>> {
        Ok(self.state.read().await.bonuses.clone())
    }

    async fn seed_catalog(&self, tiers: Vec<RewardTier>, bonuses: Vec<BonusReward>) -> AppResult<usize> {
        let mut state = self.state.write().await;
        let mut inserted = 0;

        if state.tiers.is_empty() {
            inserted += tiers.len();
            state.tiers.extend(tiers.into_iter().map(|tier| (tier.day_number, tier)));
        }

        if state.bonuses.is_empty() {
            inserted += bonuses.len();
            state.bonuses = bonuses;
        }

        Ok(inserted)
    }
}

#[async_trait]
impl BonusClaimRepositoryTrait for MemoryDatabase {
    async fn list_claims_on(&self, user_id: i64, day: NaiveDate) -> AppResult<Vec<BonusClaim>> {
        let state = self.state.read().await;

        Ok(state
            .bonus_claims
            .iter()
            .filter(|c| c.user_id == user_id && c.claimed_date == day)
            .cloned()
            .collect())
    }

    async fn claim_bonus(&self, user_id: i64, bonus_type: &str, day: NaiveDate, coins: i64) -> AppResult<User> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&user_id) {
            return Err(user_not_found(user_id));
        }
        if state.bonus_claims.iter().any(|c| c.matches(user_id, bonus_type, day)) {
            return Err(already_claimed(bonus_type));
        }

        state.bonus_claims.push(BonusClaim::new(user_id, bonus_type, day));
        let user = state.users.get_mut(&user_id).ok_or_else(|| user_not_found(user_id))?;
        user.coins += coins;

        Ok(user.clone())
    }
}

#[async_trait]
impl StudentRepositoryTrait for MemoryDatabase {
    async fn create_student(&self, name: &str, age: u32) -> AppResult<Student> {
        let mut state = self.state.write().await;
        let id = state.next_sequence(STUDENT_SEQUENCE);

        let student = Student {
            id,
            name: name.to_string(),
            age,
        };
        state.students.insert(id, student.clone());

        Ok(student)
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        Ok(self.state.read().await.students.values().cloned().collect())
    }

    async fn get_student(&self, id: i64) -> AppResult<Option<Student>> {
        Ok(self.state.read().await.students.get(&id).cloned())
    }

    async fn set_result(&self, student_id: i64, subject: &str, grade: &str) -> AppResult<StudentResult> {
        let result = StudentResult {
            student_id,
            subject: subject.to_string(),
            grade: grade.to_string(),
        };

        self.state
            .write()
            .await
            .results
            .insert((student_id, subject.to_string()), result.clone());

        Ok(result)
    }

    async fn list_results(&self, student_id: i64) -> AppResult<Vec<StudentResult>> {
        let state = self.state.read().await;

        Ok(state
            .results
            .range((student_id, String::new())..)
            .take_while(|((id, _), _)| *id == student_id)
            .map(|(_, result)| result.clone())
            .collect())
    }
}
