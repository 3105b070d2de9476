//! `SeaORM` Entity for departments table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub dept_no: String,
    #[sea_orm(unique)]
    pub dept_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::dept_emp::Entity")]
    DeptEmp,
}

impl Related<super::dept_emp::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeptEmp.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
