use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub details: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_genres::Entity")]
    MovieGenres,
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_genres::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_genres::Relation::Genre.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
