use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use crate::{
    history::{
        aggregator::{group_by_month, MonthKey},
        view_state::HistoryViewState,
        view_storage::ViewStateStorage,
    },
    store::EntryStore,
};

use super::output::{render_history, Painter};

#[derive(Debug, Parser)]
pub struct HistoryCommand {
    #[arg(short, long, help = "Show entries of every month, ignoring saved collapsed months")]
    all: bool,
}

#[derive(Debug, Parser)]
pub struct ToggleCommand {
    #[arg(
        required = true,
        help = "Months to open or close, written like \"March 2024\""
    )]
    months: Vec<MonthKey>,
}

/// Prints every month the service knows about. A failed fetch shows an empty history, the reason
/// only goes to the log.
pub async fn process_history_command(
    HistoryCommand { all }: HistoryCommand,
    store: impl EntryStore,
    storage: &ViewStateStorage,
    painter: Painter,
) -> Result<()> {
    let records = store.list_entries().await.unwrap_or_else(|e| {
        warn!("Couldn't fetch entries, showing empty history: {e}");
        vec![]
    });
    let buckets = group_by_month(&records);

    let mut state = storage.load().await?;
    if all {
        state = state.with_all_expanded(&buckets);
    }

    print!("{}", render_history(&buckets, &state, painter));
    Ok(())
}

/// Flips each given month and saves the result for the next `history`.
pub async fn process_toggle_command(
    ToggleCommand { months }: ToggleCommand,
    storage: &ViewStateStorage,
) -> Result<()> {
    let state = storage.load().await?;
    let state = toggle_all(state, &months);
    storage.save(&state).await?;

    for month in months {
        let label = if state.is_expanded(month) {
            "expanded"
        } else {
            "collapsed"
        };
        info!("{month} is now {label}");
        println!("{month}: {label}");
    }
    Ok(())
}

fn toggle_all(state: HistoryViewState, months: &[MonthKey]) -> HistoryViewState {
    months
        .iter()
        .fold(state, |state, month| state.toggle_month(*month))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::{
        history::{
            aggregator::MonthKey, view_state::HistoryViewState, view_storage::ViewStateStorage,
        },
        store::{entities::EntryRecord, MockEntryStore, StoreError},
        utils::logging::TEST_LOGGING,
    };

    use super::{
        process_history_command, process_toggle_command, toggle_all, HistoryCommand,
        ToggleCommand,
    };
    use crate::cli::output::Painter;

    #[test]
    fn test_toggle_all_flips_each_month() {
        let march = MonthKey::new_opt(2024, 3).unwrap();
        let april = MonthKey::new_opt(2024, 4).unwrap();
        let state = toggle_all(HistoryViewState::new(), &[march, april]);
        assert!(state.is_expanded(march));
        assert!(state.is_expanded(april));

        let state = toggle_all(state, &[march]);
        assert!(!state.is_expanded(march));
        assert!(state.is_expanded(april));
    }

    #[tokio::test]
    async fn test_toggle_is_saved() -> Result<()> {
        let dir = tempdir()?;
        let storage = ViewStateStorage::new(dir.path().to_path_buf());
        let march = MonthKey::new_opt(2024, 3).unwrap();

        process_toggle_command(ToggleCommand { months: vec![march] }, &storage).await?;
        assert!(storage.load().await?.is_expanded(march));

        process_toggle_command(ToggleCommand { months: vec![march] }, &storage).await?;
        assert!(!storage.load().await?.is_expanded(march));
        Ok(())
    }

    #[tokio::test]
    async fn test_history_survives_network_failure() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let storage = ViewStateStorage::new(dir.path().to_path_buf());
        let mut store = MockEntryStore::new();
        store
            .expect_list_entries()
            .times(1)
            .returning(|| Err(StoreError::Network("offline".into())));

        process_history_command(
            HistoryCommand { all: false },
            store,
            &storage,
            Painter::new(false),
        )
        .await
    }

    #[tokio::test]
    async fn test_history_all_does_not_save() -> Result<()> {
        let dir = tempdir()?;
        let storage = ViewStateStorage::new(dir.path().to_path_buf());
        let mut store = MockEntryStore::new();
        store
            .expect_list_entries()
            .times(1)
            .returning(|| Ok(vec![EntryRecord::new("a", "2024-03-01", "hi")]));

        process_history_command(HistoryCommand { all: true }, store, &storage, Painter::new(false))
            .await?;

        assert_eq!(storage.load().await?, HistoryViewState::default());
        Ok(())
    }
}
