mod classify;
mod model;

pub(crate) use self::classify::*;
pub(crate) use self::model::*;
