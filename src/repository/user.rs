use diesel::prelude::*;

use crate::domain::types::{AccountId, Email, UserId, Username};
use crate::domain::user::{Account, NewAccount, NewUserProfile, UserProfile};
use crate::models::user::{
    Account as DbAccount, NewAccount as DbNewAccount, NewUserProfile as DbNewUserProfile,
    UserProfile as DbUserProfile,
};
use crate::repository::{DieselRepository, RepositoryResult, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_account_by_email(&self, email: &Email) -> RepositoryResult<Option<Account>> {
        use crate::schema::accounts;

        let mut conn = self.conn()?;

        let account = accounts::table
            .filter(accounts::email.eq(email.as_str()))
            .first::<DbAccount>(&mut conn)
            .optional()?;

        Ok(account.map(TryInto::try_into).transpose()?)
    }

    fn get_profile_by_account_id(
        &self,
        account_id: AccountId,
    ) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let profile = users::table
            .filter(users::auth_user_id.eq(account_id.get()))
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(TryInto::try_into).transpose()?)
    }

    fn get_profile_by_id(&self, id: UserId) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let profile = users::table
            .find(id.get())
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(TryInto::try_into).transpose()?)
    }

    fn get_profile_by_username(
        &self,
        username: &Username,
    ) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let profile = users::table
            .filter(users::username.eq(username.as_str()))
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(TryInto::try_into).transpose()?)
    }

    fn list_profiles_by_ids(&self, ids: &[UserId]) -> RepositoryResult<Vec<UserProfile>> {
        use crate::schema::users;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let profiles = users::table
            .filter(users::id.eq_any(raw_ids))
            .load::<DbUserProfile>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<UserProfile>, _>>()?;

        Ok(profiles)
    }
}

impl UserWriter for DieselRepository {
    fn create_account(
        &self,
        account: &NewAccount,
        profile: &NewUserProfile,
    ) -> RepositoryResult<(Account, UserProfile)> {
        use crate::schema::{accounts, users};

        let mut conn = self.conn()?;

        let (db_account, db_profile) = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let db_account = diesel::insert_into(accounts::table)
                .values(DbNewAccount::from(account))
                .get_result::<DbAccount>(conn)?;

            let db_profile = diesel::insert_into(users::table)
                .values(DbNewUserProfile::for_account(profile, db_account.id))
                .get_result::<DbUserProfile>(conn)?;

            Ok((db_account, db_profile))
        })?;

        let account: Account = db_account.try_into()?;
        let profile: UserProfile = db_profile.try_into()?;

        Ok((account, profile))
    }
}
