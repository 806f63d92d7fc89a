use diesel::prelude::*;

use crate::domain::tutorial::Tutorial;
use crate::domain::types::TutorialId;
use crate::models::tutorial::Tutorial as DbTutorial;
use crate::repository::{DieselRepository, RepositoryResult, TutorialReader};

impl TutorialReader for DieselRepository {
    fn list_tutorials(&self) -> RepositoryResult<Vec<Tutorial>> {
        use crate::schema::tutorials;

        let mut conn = self.conn()?;

        let items = tutorials::table
            .order(tutorials::label.asc())
            .load::<DbTutorial>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Tutorial>, _>>()?;

        Ok(items)
    }

    fn get_tutorial_by_id(&self, id: TutorialId) -> RepositoryResult<Option<Tutorial>> {
        use crate::schema::tutorials;

        let mut conn = self.conn()?;

        let tutorial = tutorials::table
            .filter(tutorials::id.eq(id.get()))
            .first::<DbTutorial>(&mut conn)
            .optional()?;

        let tutorial = tutorial.map(TryInto::try_into).transpose()?;
        Ok(tutorial)
    }
}
