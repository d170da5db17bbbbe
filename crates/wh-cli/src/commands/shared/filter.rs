use wh_core::filter::{HistoryFilter, HistoryQuery};

use crate::cli::subcommands::HistoryFilterArgs;

/// Validate history filter flags before any database call.
pub fn history_filter(
    args: &HistoryFilterArgs,
    limit: Option<u32>,
    offset: Option<u32>,
) -> anyhow::Result<HistoryFilter> {
    let query = HistoryQuery {
        item_id: args.item.clone(),
        user_id: args.user.clone(),
        action: args.action.clone(),
        from: args.from.clone(),
        to: args.to.clone(),
        sort_by: args.sort_by.clone(),
        sort_order: args.sort_order.clone(),
        limit,
        offset,
    };
    Ok(HistoryFilter::parse(&query)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wh_core::enums::AuditAction;

    use super::history_filter;
    use crate::cli::subcommands::HistoryFilterArgs;

    #[test]
    fn carries_flags_and_paging() {
        let args = HistoryFilterArgs {
            action: Some("delete".into()),
            sort_order: Some("asc".into()),
            ..HistoryFilterArgs::default()
        };
        let filter = history_filter(&args, Some(10), Some(20)).expect("filter should parse");
        assert_eq!(filter.action, Some(AuditAction::Delete));
        assert_eq!(filter.sort_order.as_deref(), Some("asc"));
        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.offset, Some(20));
    }

    #[test]
    fn rejects_malformed_item_id() {
        let args = HistoryFilterArgs {
            item: Some("42".into()),
            ..HistoryFilterArgs::default()
        };
        let err = history_filter(&args, None, None).expect_err("should fail");
        assert!(err.to_string().contains("item_id"));
    }

    #[test]
    fn rejects_inverted_range() {
        let args = HistoryFilterArgs {
            from: Some("2026-03-02T00:00:00Z".into()),
            to: Some("2026-03-01T00:00:00Z".into()),
            ..HistoryFilterArgs::default()
        };
        assert!(history_filter(&args, None, None).is_err());
    }
}
