////////////////////////////////////////////////////////////////////////
//
// 1. 每个Domain(Entity)单独一个文件夹
// 2. 每个Domain由两部分组成:
//    - model: 定义Schema
//    - repository: 实际的数据库底层操作
//
//////////////////////////////////////////////////////////////////////

use mongodb::{bson::doc, options::IndexOptions, Client, Collection, IndexModel};
use std::sync::Arc;
use tracing::info;
use utils::{AppConfig, AppResult, StorageBackend};

pub mod bonus_claim;
pub mod counter;
pub mod memory;
pub mod reward;
pub mod seed;
pub mod student;
pub mod user;

pub use memory::MemoryDatabase;

use bonus_claim::repository::DynBonusClaimRepository;
use reward::repository::DynRewardRepository;
use student::repository::DynStudentRepository;
use user::repository::DynUserRepository;

/// MongoDB backend. Each collection's repository trait is implemented
/// directly on this struct.
#[derive(Clone, Debug)]
pub struct Database {
    pub users: Collection<user::model::User>,
    pub reward_tiers: Collection<reward::model::RewardTier>,
    pub bonus_rewards: Collection<reward::model::BonusReward>,
    pub bonus_claims: Collection<bonus_claim::model::BonusClaim>,
    pub students: Collection<student::model::Student>,
    pub student_results: Collection<student::model::StudentResult>,
    pub counters: Collection<counter::Counter>,
}

impl Database {
    pub async fn new(config: Arc<AppConfig>) -> AppResult<Self> {
        let client = Client::with_uri_str(&config.mongo_uri).await?;
        let db: mongodb::Database = client.database(&config.mongo_db);

        let database = Database {
            users: db.collection("User"),
            reward_tiers: db.collection("RewardTier"),
            bonus_rewards: db.collection("BonusReward"),
            bonus_claims: db.collection("BonusClaim"),
            students: db.collection("Student"),
            student_results: db.collection("StudentResult"),
            counters: db.collection("Counter"),
        };

        info!("🧱 database({:#}) connected.", &config.mongo_db);

        Ok(database)
    }

    /// 初始化索引
    ///
    /// The bonus claim index is what enforces one claim per user, bonus
    /// and day, so a failure here aborts startup.
    pub async fn init_indexes(&self) -> AppResult<()> {
        let claim_per_day = IndexModel::builder()
            .keys(doc! { "user_id": 1, "bonus_type": 1, "claimed_date": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_bonus_day_unique".to_string())
                    .build(),
            )
            .build();
        self.bonus_claims.create_index(claim_per_day, None).await?;

        let result_per_subject = IndexModel::builder()
            .keys(doc! { "student_id": 1, "subject": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("student_subject_unique".to_string())
                    .build(),
            )
            .build();
        self.student_results.create_index(result_per_subject, None).await?;

        info!("✅ indexes ready");
        Ok(())
    }
}

/// Repository handles the services are built from. Cloning shares the
/// same underlying backend.
#[derive(Clone)]
pub struct Storage {
    pub users: DynUserRepository,
    pub rewards: DynRewardRepository,
    pub bonus_claims: DynBonusClaimRepository,
    pub students: DynStudentRepository,
}

impl Storage {
    pub fn from_mongo(db: Database) -> Self {
        let db = Arc::new(db);
        Self {
            users: db.clone(),
            rewards: db.clone(),
            bonus_claims: db.clone(),
            students: db,
        }
    }

    pub fn from_memory(db: MemoryDatabase) -> Self {
        let db = Arc::new(db);
        Self {
            users: db.clone(),
            rewards: db.clone(),
            bonus_claims: db.clone(),
            students: db,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_memory(MemoryDatabase::new())
    }

    /// Opens the backend picked by `STORAGE_BACKEND`.
    pub async fn connect(config: Arc<AppConfig>) -> AppResult<Self> {
        match config.storage_backend {
            StorageBackend::Mongo => {
                let db = Database::new(config).await?;
                db.init_indexes().await?;
                Ok(Self::from_mongo(db))
            }
            StorageBackend::Memory => {
                info!("🧠 using in-memory storage, data will not survive a restart");
                Ok(Self::in_memory())
            }
        }
    }
}
