use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
    pub genre: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub poster: Option<String>,
    pub description: Option<String>,
    pub director_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::directors::Entity",
        from = "Column::DirectorId",
        to = "super::directors::Column::Id"
    )]
    Director,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::user_movies::Entity")]
    UserMovies,
    #[sea_orm(has_many = "super::movie_genres::Entity")]
    MovieGenres,
}

impl Related<super::directors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Director.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::user_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMovies.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::movie_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::movie_genres::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
