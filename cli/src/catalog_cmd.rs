use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use estate_backend_client::HttpCatalogBackend;
use estate_catalog::Action;
use estate_catalog::Browser;
use estate_catalog::CatalogBackend;
use estate_catalog::ListingDraft;
use estate_catalog::Ownership;
use estate_catalog::PropertyGroup;
use estate_catalog::PropertyType;
use estate_catalog::RangeField;
use estate_catalog::Session;
use estate_catalog::SnapshotBackend;
use tracing::debug;
use tracing::info;

use crate::config::CliConfig;
use crate::render;

/// Browse, filter and edit the property catalog.
#[derive(Debug, Parser)]
#[command(name = "estate", version)]
pub struct EstateCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: EstateCommand,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Catalog service base URL (overrides ESTATE_API_BASE and config.toml)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Work against a catalog JSON file instead of the service; edits are
    /// written back to it
    #[arg(long, global = true, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Config file (defaults to $ESTATE_HOME/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum EstateCommand {
    /// List the whole catalog in canonical order
    List(ListArgs),

    /// Search by keyword, or by the selected category when no keyword is given
    Search(SearchArgs),

    /// Filter the selected category by numeric ranges
    Filter(FilterArgs),

    /// Show the numeric bounds the service reports for a category
    Bounds(CategoryArgs),

    /// Delete a listing by id
    Delete(DeleteArgs),

    /// Create a listing in the selected category
    Create(CreateArgs),

    /// Count listings per category
    Summary,
}

#[derive(Debug, Default, Args)]
pub struct CategoryArgs {
    /// sale or rent
    #[arg(long)]
    pub ownership: Option<Ownership>,

    /// residential, commercial or land (implied by --type)
    #[arg(long)]
    pub group: Option<PropertyGroup>,

    /// apartment, villa, office, shop or land
    #[arg(long = "type", value_name = "TYPE")]
    pub property_type: Option<PropertyType>,
}

impl CategoryArgs {
    /// Rejects a `--type` that `--group` does not offer.
    pub fn validate(&self) -> Result<()> {
        if let (Some(group), Some(property_type)) = (self.group, self.property_type)
            && !group.allows(property_type)
        {
            anyhow::bail!("property type {property_type} is not offered under {group}");
        }
        Ok(())
    }
}

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Page to show, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Records per page: 5, 10, 20 or 50
    #[arg(long)]
    pub size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only show listings whose text contains this keyword
    #[arg(long)]
    pub keyword: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Keyword matched against address, owner, email and the other fields
    #[arg(value_name = "KEYWORD")]
    pub keyword: Option<String>,

    #[command(flatten)]
    pub category: CategoryArgs,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub category: CategoryArgs,

    /// Range as FIELD=LO..HI; either end may be empty. Repeatable.
    #[arg(long = "range", value_name = "FIELD=LO..HI", value_parser = parse_range)]
    pub ranges: Vec<RangeArg>,

    /// Only show results whose text contains this keyword
    #[arg(long)]
    pub keyword: Option<String>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Listing id
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub category: CategoryArgs,

    #[arg(long)]
    pub address: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub owner: String,

    #[arg(long)]
    pub area: Option<f64>,

    /// Sale price (sale listings)
    #[arg(long)]
    pub full_price: Option<f64>,

    /// Monthly rent (rent listings)
    #[arg(long)]
    pub rent_price: Option<f64>,

    /// Deposit (rent listings)
    #[arg(long)]
    pub mortgage_price: Option<f64>,

    /// Intended use (land)
    #[arg(long)]
    pub what_use: Option<String>,

    /// Rooms (office, shop, apartment)
    #[arg(long)]
    pub room_count: Option<i64>,

    /// Yard area (villa)
    #[arg(long)]
    pub yard_area: Option<f64>,

    /// Floors (apartment)
    #[arg(long)]
    pub floor_count: Option<i64>,
}

impl CreateArgs {
    fn into_draft(self) -> ListingDraft {
        ListingDraft {
            address: self.address,
            email: self.email,
            area: self.area,
            owner_full_name: self.owner,
            full_price: self.full_price,
            rent_price: self.rent_price,
            mortgage_price: self.mortgage_price,
            what_use: self.what_use,
            room_count: self.room_count,
            yard_area: self.yard_area,
            floor_count: self.floor_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeArg {
    pub field: RangeField,
    pub lo: String,
    pub hi: String,
}

fn parse_range(raw: &str) -> Result<RangeArg, String> {
    let (field, span) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=LO..HI, got `{raw}`"))?;
    let field = field
        .trim()
        .replace('-', "_")
        .parse::<RangeField>()
        .map_err(|_| format!("unknown range field `{field}`"))?;
    let (lo, hi) = span
        .split_once("..")
        .ok_or_else(|| format!("expected LO..HI, got `{span}`"))?;
    Ok(RangeArg {
        field,
        lo: lo.trim().to_string(),
        hi: hi.trim().to_string(),
    })
}

/// Where listings come from.
enum Source {
    Snapshot {
        path: PathBuf,
        backend: Arc<SnapshotBackend>,
    },
    Service(Arc<HttpCatalogBackend>),
}

impl Source {
    async fn open(global: &GlobalArgs, config: &CliConfig) -> Result<Self> {
        if let Some(path) = &global.snapshot {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read snapshot {}", path.display()))?;
            let backend = SnapshotBackend::from_json(&raw)
                .with_context(|| format!("invalid snapshot {}", path.display()))?;
            debug!("browsing snapshot {}", path.display());
            return Ok(Source::Snapshot {
                path: path.clone(),
                backend: Arc::new(backend),
            });
        }
        let api_base = config.api_base(global.api_base.as_deref());
        debug!("browsing catalog service at {api_base}");
        let backend = HttpCatalogBackend::with_timeout(api_base, config.timeout())
            .context("failed to configure catalog service client")?;
        Ok(Source::Service(Arc::new(backend)))
    }

    fn backend(&self) -> Arc<dyn CatalogBackend> {
        match self {
            Source::Snapshot { backend, .. } => backend.clone(),
            Source::Service(backend) => backend.clone(),
        }
    }

    /// Writes local edits back to the snapshot file. The service persists
    /// its own.
    async fn persist(&self) -> Result<()> {
        let Source::Snapshot { path, backend } = self else {
            return Ok(());
        };
        let raw = serde_json::to_string_pretty(&backend.snapshot().await)?;
        tokio::fs::write(path, raw)
            .await
            .with_context(|| format!("failed to write snapshot {}", path.display()))?;
        info!("wrote snapshot {}", path.display());
        Ok(())
    }
}

impl EstateCommand {
    fn category(&self) -> Option<&CategoryArgs> {
        match self {
            EstateCommand::Search(args) => Some(&args.category),
            EstateCommand::Filter(args) => Some(&args.category),
            EstateCommand::Bounds(args) => Some(args),
            EstateCommand::Create(args) => Some(&args.category),
            EstateCommand::List(_) | EstateCommand::Delete(_) | EstateCommand::Summary => None,
        }
    }
}

impl EstateCli {
    pub async fn run(self) -> Result<()> {
        if let Some(category) = self.command.category() {
            category.validate()?;
        }
        let config = CliConfig::load(self.global.config.as_deref())?;
        let source = Source::open(&self.global, &config).await?;
        let session = Session::new(config.session.clone()).context("invalid session settings")?;
        let mut browser = Browser::start(session, source.backend());
        browser.settle().await;

        match self.command {
            EstateCommand::List(args) => {
                if let Some(keyword) = args.keyword {
                    browser.dispatch(Action::SetKeyword(keyword));
                }
                turn_to(&mut browser, &args.page);
                render::print_page(&browser.session().page_view());
            }
            EstateCommand::Search(args) => {
                select_category(&mut browser, &args.category).await;
                browser.dispatch(Action::SetKeyword(args.keyword.unwrap_or_default()));
                browser.dispatch(Action::Search);
                browser.settle().await;
                turn_to(&mut browser, &args.page);
                render::print_page(&browser.session().page_view());
            }
            EstateCommand::Filter(args) => {
                select_category(&mut browser, &args.category).await;
                for range in args.ranges {
                    browser.dispatch(Action::SetRange {
                        field: range.field,
                        lo: range.lo,
                        hi: range.hi,
                    });
                }
                if let Some(keyword) = args.keyword {
                    browser.dispatch(Action::SetKeyword(keyword));
                }
                browser.dispatch(Action::ApplyFilters);
                browser.settle().await;
                turn_to(&mut browser, &args.page);
                render::print_page(&browser.session().page_view());
            }
            EstateCommand::Bounds(args) => {
                select_category(&mut browser, &args).await;
                let session = browser.session();
                render::print_bounds(session.category(), session.bounds());
            }
            EstateCommand::Delete(args) => {
                browser.dispatch(Action::Delete { id: args.id });
                browser.settle().await;
                source.persist().await?;
            }
            EstateCommand::Create(args) => {
                select_category(&mut browser, &args.category).await;
                browser.dispatch(Action::Create {
                    draft: args.into_draft(),
                });
                browser.settle().await;
                source.persist().await?;
            }
            EstateCommand::Summary => {
                render::print_summary(&browser.session().catalog().summary());
            }
        }

        report_notices(&mut browser)
    }
}

async fn select_category(browser: &mut Browser, args: &CategoryArgs) {
    if let Some(ownership) = args.ownership {
        browser.dispatch(Action::SelectOwnership(ownership));
    }
    if let Some(group) = args.group.or(args.property_type.map(PropertyType::group)) {
        browser.dispatch(Action::SelectGroup(group));
    }
    if let Some(property_type) = args.property_type {
        browser.dispatch(Action::SelectType(property_type));
    }
    browser.settle().await;
}

fn turn_to(browser: &mut Browser, args: &PageArgs) {
    if let Some(size) = args.size {
        browser.dispatch(Action::SetPageSize(size));
    }
    for _ in 1..args.page {
        browser.dispatch(Action::NextPage);
    }
}

/// Prints every notice; the first failure becomes the command's error.
fn report_notices(browser: &mut Browser) -> Result<()> {
    let notices = browser.take_notices();
    for notice in &notices {
        render::print_notice(notice);
    }
    match notices.into_iter().find(|notice| notice.failed) {
        Some(failure) => anyhow::bail!("{}", failure.message),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_open_ended_ranges() {
        assert_eq!(
            parse_range("room_count=3..").expect("valid"),
            RangeArg {
                field: RangeField::RoomCount,
                lo: "3".to_string(),
                hi: String::new(),
            }
        );
        assert_eq!(
            parse_range("yard-area=..60").expect("valid").field,
            RangeField::YardArea
        );
        assert_eq!(
            parse_range("Price= 100 .. 900 ").expect("valid"),
            RangeArg {
                field: RangeField::Price,
                lo: "100".to_string(),
                hi: "900".to_string(),
            }
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(parse_range("price").is_err());
        assert!(parse_range("price=100").is_err());
        assert!(parse_range("height=1..2").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        EstateCli::command().debug_assert();
    }

    #[test]
    fn group_and_type_must_agree() {
        let conflicting = CategoryArgs {
            ownership: None,
            group: Some(PropertyGroup::Commercial),
            property_type: Some(PropertyType::Villa),
        };
        let err = conflicting.validate().expect_err("villa is residential");
        assert_eq!(
            err.to_string(),
            "property type villa is not offered under commercial"
        );

        let implied = CategoryArgs {
            property_type: Some(PropertyType::Villa),
            ..Default::default()
        };
        assert!(implied.validate().is_ok());
    }

    #[test]
    fn type_flag_parses_case_insensitively() {
        let cli = EstateCli::try_parse_from([
            "estate",
            "bounds",
            "--ownership",
            "Rent",
            "--type",
            "VILLA",
        ])
        .expect("parses");
        let EstateCommand::Bounds(args) = cli.command else {
            panic!("expected bounds");
        };
        assert_eq!(args.ownership, Some(Ownership::Rent));
        assert_eq!(args.property_type, Some(PropertyType::Villa));
        assert_eq!(args.group, None);
    }
}
