use diesel::prelude::*;

use crate::domain::post::{NewPost, Post};
use crate::domain::types::{PostId, TopicId};
use crate::models::post::{NewPost as DbNewPost, Post as DbPost};
use crate::repository::{
    DieselRepository, PostListQuery, PostReader, PostWriter, RepositoryResult,
};

impl PostReader for DieselRepository {
    fn list_posts(&self, query: PostListQuery) -> RepositoryResult<(usize, Vec<Post>)> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let query_builder = || {
            posts::table
                .filter(posts::topic_id.eq(query.topic_id.get()))
                .into_boxed::<diesel::sqlite::Sqlite>()
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((posts::created_at.asc(), posts::id.asc()));
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .load::<DbPost>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Post>, _>>()?;

        Ok((total, items))
    }

    fn get_post_by_id(&self, id: PostId) -> RepositoryResult<Option<Post>> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let post = posts::table
            .find(id.get())
            .first::<DbPost>(&mut conn)
            .optional()?;

        Ok(post.map(TryInto::try_into).transpose()?)
    }

    fn count_posts(&self, topic_id: TopicId) -> RepositoryResult<usize> {
        use crate::schema::posts;

        let mut conn = self.conn()?;

        let total = posts::table
            .filter(posts::topic_id.eq(topic_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }
}

impl PostWriter for DieselRepository {
    fn create_post(&self, post: &NewPost) -> RepositoryResult<Post> {
        use crate::schema::{posts, topics};

        let mut conn = self.conn()?;

        let db_post = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let db_post = diesel::insert_into(posts::table)
                .values(DbNewPost::from(post))
                .get_result::<DbPost>(conn)?;

            // Never move activity backwards when clocks disagree.
            diesel::update(
                topics::table
                    .filter(topics::id.eq(db_post.topic_id))
                    .filter(topics::last_activity_at.lt(db_post.created_at)),
            )
            .set(topics::last_activity_at.eq(db_post.created_at))
            .execute(conn)?;

            Ok(db_post)
        })?;

        Ok(db_post.try_into()?)
    }
}
