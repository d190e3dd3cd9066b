//! The `estate` command line: drives an [`estate_catalog::Browser`] against
//! the catalog service or a local snapshot file and prints what it shows.

mod catalog_cmd;
mod config;
mod render;

pub use catalog_cmd::CategoryArgs;
pub use catalog_cmd::CreateArgs;
pub use catalog_cmd::DeleteArgs;
pub use catalog_cmd::EstateCli;
pub use catalog_cmd::EstateCommand;
pub use catalog_cmd::FilterArgs;
pub use catalog_cmd::GlobalArgs;
pub use catalog_cmd::ListArgs;
pub use catalog_cmd::PageArgs;
pub use catalog_cmd::RangeArg;
pub use catalog_cmd::SearchArgs;
pub use config::API_BASE_ENV;
pub use config::CliConfig;
pub use config::ESTATE_HOME_ENV;
pub use config::estate_home;
