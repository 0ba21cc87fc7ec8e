use mongodb::Database;
use mongodb::bson::doc;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const COLLECTION: &str = "groups";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub creator: String,
    pub users: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub group_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GroupProfile {
    pub id: String,
    pub name: String,
    pub creator: String,
    pub users: Vec<String>,
}

impl From<&Group> for GroupProfile {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            creator: group.creator.clone(),
            users: group.users.clone(),
        }
    }
}

impl Group {
    pub fn profile(&self) -> GroupProfile {
        GroupProfile::from(self)
    }

    /// Group ids are client-supplied; uniqueness rests on the store's own
    /// `_id` constraint.
    pub async fn create(
        db: &Database,
        group_id: &str,
        creator: &str,
        name: &str,
    ) -> Result<Self, AppError> {
        let group = Group {
            id: group_id.to_string(),
            name: name.to_string(),
            creator: creator.to_string(),
            users: vec![creator.to_string()],
        };

        db.collection::<Group>(COLLECTION)
            .insert_one(&group)
            .await?;

        tracing::info!("Created group {} for {}", group.id, group.creator);
        Ok(group)
    }

    pub async fn get_by_id(db: &Database, id: &str) -> Result<Option<Self>, AppError> {
        let group = db
            .collection::<Group>(COLLECTION)
            .find_one(doc! { "_id": id })
            .await?;

        Ok(group)
    }

    // $addToSet keeps repeated additions idempotent.
    pub async fn add_member(db: &Database, group_id: &str, user_id: &str) -> Result<(), AppError> {
        db.collection::<Group>(COLLECTION)
            .update_one(
                doc! { "_id": group_id },
                doc! { "$addToSet": { "users": user_id } },
            )
            .await?;

        Ok(())
    }

    pub async fn remove_member(
        db: &Database,
        group_id: &str,
        user_id: &str,
    ) -> Result<(), AppError> {
        db.collection::<Group>(COLLECTION)
            .update_one(
                doc! { "_id": group_id },
                doc! { "$pull": { "users": user_id } },
            )
            .await?;

        Ok(())
    }

    // Administrative/test-only removal; no API route points here.
    pub async fn remove(db: &Database, id: &str) -> Result<(), AppError> {
        db.collection::<Group>(COLLECTION)
            .delete_one(doc! { "_id": id })
            .await?;

        Ok(())
    }
}
