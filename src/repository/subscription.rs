use diesel::prelude::*;
use pushkind_common::pagination::Pagination;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::{
    domain::{
        subscription::{
            NewSubscription as DomainNewSubscription, Subscription as DomainSubscription,
        },
        user::User as DomainUser,
    },
    models::{
        subscription::{NewSubscription as DbNewSubscription, Subscription as DbSubscription},
        user::User as DbUser,
    },
    repository::{DieselRepository, SubscriptionReader, SubscriptionWriter, page_window},
};

impl SubscriptionReader for DieselRepository {
    fn subscription_exists(&self, user_id: i32, author_id: i32) -> RepositoryResult<bool> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let count = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::author_id.eq(author_id))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(count > 0)
    }

    fn subscribed_author_ids(
        &self,
        user_id: i32,
        author_ids: &[i32],
    ) -> RepositoryResult<Vec<i32>> {
        use crate::schema::subscriptions;

        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let ids = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::author_id.eq_any(author_ids))
            .select(subscriptions::author_id)
            .distinct()
            .load::<i32>(&mut conn)?;

        Ok(ids)
    }

    fn list_subscribed_authors(
        &self,
        user_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        use crate::schema::{subscriptions, users};

        let mut conn = self.conn()?;

        let author_ids = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .select(subscriptions::author_id)
            .distinct()
            .load::<i32>(&mut conn)?;

        let total = author_ids.len();
        if author_ids.is_empty() {
            return Ok((0, Vec::new()));
        }

        let mut items = users::table
            .filter(users::id.eq_any(author_ids))
            .order(users::username.desc())
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &pagination {
            let Some((offset, limit)) = page_window(pagination) else {
                return Ok((total, Vec::new()));
            };
            items = items.offset(offset).limit(limit);
        }

        let authors = items.load::<DbUser>(&mut conn)?;

        Ok((total, authors.into_iter().map(Into::into).collect()))
    }
}

impl SubscriptionWriter for DieselRepository {
    fn create_subscription(
        &self,
        new_subscription: &DomainNewSubscription,
    ) -> RepositoryResult<DomainSubscription> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;
        let db_new = DbNewSubscription::from(new_subscription);

        let created = diesel::insert_into(subscriptions::table)
            .values(&db_new)
            .get_result::<DbSubscription>(&mut conn)?;

        Ok(created.into())
    }

    fn delete_subscription(&self, user_id: i32, author_id: i32) -> RepositoryResult<()> {
        use crate::schema::subscriptions;

        let mut conn = self.conn()?;

        let target = subscriptions::table
            .filter(subscriptions::user_id.eq(user_id))
            .filter(subscriptions::author_id.eq(author_id));

        let deleted = diesel::delete(target).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
