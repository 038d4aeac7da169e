pub mod bonus_service;
pub mod reward_service;
pub mod student_service;
pub mod user_service;

#[cfg(test)]
mod tests;

use bonus_service::{BonusService, DynBonusService};
use database::Storage;
use reward_service::{DynRewardService, RewardService};
use std::sync::Arc;
use student_service::{DynStudentService, StudentService};
use tracing::info;
use user_service::{DynUserService, UserService};
use utils::{DynClock, StreakPolicy, SystemClock};

#[derive(Clone)]
pub struct Services {
    pub user: DynUserService,
    pub reward: DynRewardService,
    pub bonus: DynBonusService,
    pub student: DynStudentService,
    /// Decides what "today" is for every claim.
    pub clock: DynClock,
    pub streak_policy: StreakPolicy,
}

impl Services {
    pub fn new(storage: Storage, streak_policy: StreakPolicy) -> Self {
        Self::with_clock(storage, streak_policy, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Storage, streak_policy: StreakPolicy, clock: DynClock) -> Self {
        let user = Arc::new(UserService::new(storage.users.clone())) as DynUserService;
        let reward = Arc::new(RewardService::new(
            storage.users.clone(),
            storage.rewards.clone(),
            streak_policy,
        )) as DynRewardService;
        let bonus = Arc::new(BonusService::new(
            storage.users.clone(),
            storage.rewards.clone(),
            storage.bonus_claims.clone(),
        )) as DynBonusService;
        let student = Arc::new(StudentService::new(storage.students)) as DynStudentService;

        info!("🧠 services initialized (streak policy: {:?})", streak_policy);

        Self {
            user,
            reward,
            bonus,
            student,
            clock,
            streak_policy,
        }
    }
}
