use diesel::prelude::*;

use crate::domain::post::Post;
use crate::domain::topic::{NewTopic, Topic, TopicSummary};
use crate::domain::types::{CategoryId, TopicId};
use crate::models::post::{NewPost as DbNewPost, Post as DbPost};
use crate::models::topic::{NewTopic as DbNewTopic, Topic as DbTopic};
use crate::repository::{DieselRepository, RepositoryResult, TopicReader, TopicWriter};

type SummaryRow = (DbTopic, Option<String>, Option<String>);

fn into_summary((topic, author_name, category_name): SummaryRow) -> RepositoryResult<TopicSummary> {
    Ok(TopicSummary {
        topic: topic.try_into()?,
        author_name,
        category_name,
    })
}

impl TopicReader for DieselRepository {
    fn list_topics(&self, category_id: CategoryId) -> RepositoryResult<Vec<TopicSummary>> {
        use crate::schema::{categories, topics, users};

        let mut conn = self.conn()?;

        let rows = topics::table
            .left_join(users::table)
            .left_join(categories::table)
            .filter(topics::category_id.eq(category_id.get()))
            .order((
                topics::last_activity_at.desc(),
                topics::created_at.desc(),
                topics::id.desc(),
            ))
            .select((
                topics::all_columns,
                users::username.nullable(),
                categories::name.nullable(),
            ))
            .load::<SummaryRow>(&mut conn)?;

        rows.into_iter().map(into_summary).collect()
    }

    fn get_topic_by_id(&self, id: TopicId) -> RepositoryResult<Option<Topic>> {
        use crate::schema::topics;

        let mut conn = self.conn()?;

        let topic = topics::table
            .find(id.get())
            .first::<DbTopic>(&mut conn)
            .optional()?;

        Ok(topic.map(TryInto::try_into).transpose()?)
    }

    fn get_topic_summary(&self, id: TopicId) -> RepositoryResult<Option<TopicSummary>> {
        use crate::schema::{categories, topics, users};

        let mut conn = self.conn()?;

        let row = topics::table
            .left_join(users::table)
            .left_join(categories::table)
            .filter(topics::id.eq(id.get()))
            .select((
                topics::all_columns,
                users::username.nullable(),
                categories::name.nullable(),
            ))
            .first::<SummaryRow>(&mut conn)
            .optional()?;

        row.map(into_summary).transpose()
    }
}

impl TopicWriter for DieselRepository {
    fn create_topic(&self, topic: &NewTopic) -> RepositoryResult<(Topic, Post)> {
        use crate::schema::{posts, topics};

        let mut conn = self.conn()?;

        let (db_topic, db_post) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let db_topic = diesel::insert_into(topics::table)
                .values(DbNewTopic::from(topic))
                .get_result::<DbTopic>(conn)?;

            let db_post = diesel::insert_into(posts::table)
                .values(DbNewPost {
                    topic_id: db_topic.id,
                    author_id: topic.author_id.get(),
                    content: topic.content.as_str(),
                    parent_post_id: None,
                    created_at: topic.created_at,
                })
                .get_result::<DbPost>(conn)?;

            Ok((db_topic, db_post))
        })?;

        Ok((db_topic.try_into()?, db_post.try_into()?))
    }
}
