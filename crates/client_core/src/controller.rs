//! Paged, filtered, searchable collection state for one entity type, with the
//! single-item mutations the console exposes on top of it.
//!
//! Every operation reports failures through the [`Notifier`], records them as
//! `last_error`, and also returns them to the caller. State is only replaced
//! by a successful response; a failed request leaves the previous snapshot in
//! place.

use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{ApplicationStatus, FollowerRange, RecordId},
    protocol::ListEnvelope,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    config::{ConsoleConfig, DEFAULT_METRICS_LIMIT},
    entities::{ContactMessages, InfluencerApplications, InfluencerPartners},
    entity::{EntityKind, FilterDimension, ListFilters, ListRecord, RecordStatus, StatusChange},
    error::ConsoleError,
    export::{export_file_name, ExportRow, ExportTable},
    forms::{PartnerDraft, RejectionDraft, ReplyDraft},
    metrics::StatusMetrics,
    notify::{Notification, Notifier},
    session::Session,
    transport::{AdminApi, ApiRequest},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub search: Option<String>,
    pub filters: ListFilters,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self::page(1)
    }
}

impl PageQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            search: None,
            filters: ListFilters::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_filter(mut self, dimension: FilterDimension, value: impl Into<String>) -> Self {
        self.filters.insert(dimension, value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub filters: ListFilters,
}

impl PageState {
    fn new(page_size: Option<u32>) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            page_size,
            search: None,
            filters: ListFilters::new(),
        }
    }

    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.current_page,
            search: self.search.clone(),
            filters: self.filters.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    List,
    Metrics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    LoadingChanged {
        target: LoadTarget,
        loading: bool,
    },
    PageLoaded {
        current_page: u32,
        total_pages: u32,
        count: usize,
    },
    RecordRemoved {
        id: RecordId,
    },
    StatusChanged {
        id: RecordId,
        status: &'static str,
    },
    MetricsUpdated {
        total: usize,
    },
}

/// Everything a view needs to render one collection page.
#[derive(Debug, Clone)]
pub struct ListSnapshot<R: ListRecord> {
    pub records: Vec<R>,
    pub page: PageState,
    pub loading: bool,
    pub metrics_loading: bool,
    pub metrics: Option<StatusMetrics<R::Status>>,
    pub last_error: Option<ConsoleError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    pub page_size: Option<u32>,
    pub metrics_limit: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            page_size: None,
            metrics_limit: DEFAULT_METRICS_LIMIT,
        }
    }
}

impl From<&ConsoleConfig> for ControllerOptions {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            page_size: config.page_size,
            metrics_limit: config.metrics_limit.max(1),
        }
    }
}

struct ControllerState<R: ListRecord> {
    records: Vec<R>,
    page: PageState,
    metrics: Option<StatusMetrics<R::Status>>,
    last_error: Option<ConsoleError>,
    latest_load: u64,
    latest_metrics: u64,
    closed: bool,
}

/// Counts one outstanding request; the count drops again however the
/// request future ends, including cancellation.
struct InFlight<'a> {
    counter: &'a AtomicUsize,
    target: LoadTarget,
    events: &'a broadcast::Sender<ListEvent>,
}

impl<'a> InFlight<'a> {
    fn enter(
        counter: &'a AtomicUsize,
        target: LoadTarget,
        events: &'a broadcast::Sender<ListEvent>,
    ) -> Self {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            let _ = events.send(ListEvent::LoadingChanged {
                target,
                loading: true,
            });
        }
        Self {
            counter,
            target,
            events,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.events.send(ListEvent::LoadingChanged {
                target: self.target,
                loading: false,
            });
        }
    }
}

pub struct ListControllerBuilder<E: EntityKind> {
    api: Arc<dyn AdminApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    options: ControllerOptions,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityKind> ListControllerBuilder<E> {
    pub fn options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.options.page_size = Some(page_size).filter(|size| *size > 0);
        self
    }

    pub fn metrics_limit(mut self, metrics_limit: u32) -> Self {
        self.options.metrics_limit = metrics_limit.max(1);
        self
    }

    pub fn build(self) -> ListController<E> {
        let (events, _) = broadcast::channel(256);
        ListController {
            api: self.api,
            session: self.session,
            notifier: self.notifier,
            state: Mutex::new(ControllerState {
                records: Vec::new(),
                page: PageState::new(self.options.page_size),
                metrics: None,
                last_error: None,
                latest_load: 0,
                latest_metrics: 0,
                closed: false,
            }),
            options: self.options,
            list_loads: AtomicUsize::new(0),
            metrics_loads: AtomicUsize::new(0),
            events,
            _entity: PhantomData,
        }
    }
}

pub struct ListController<E: EntityKind> {
    api: Arc<dyn AdminApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    options: ControllerOptions,
    state: Mutex<ControllerState<E::Record>>,
    list_loads: AtomicUsize,
    metrics_loads: AtomicUsize,
    events: broadcast::Sender<ListEvent>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityKind> ListController<E> {
    pub fn builder(
        api: Arc<dyn AdminApi>,
        session: Session,
        notifier: Arc<dyn Notifier>,
    ) -> ListControllerBuilder<E> {
        ListControllerBuilder {
            api,
            session,
            notifier,
            options: ControllerOptions::default(),
            _entity: PhantomData,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.list_loads.load(Ordering::SeqCst) > 0
    }

    pub fn is_metrics_loading(&self) -> bool {
        self.metrics_loads.load(Ordering::SeqCst) > 0
    }

    pub async fn snapshot(&self) -> ListSnapshot<E::Record> {
        let guard = self.state.lock().await;
        ListSnapshot {
            records: guard.records.clone(),
            page: guard.page.clone(),
            loading: self.is_loading(),
            metrics_loading: self.is_metrics_loading(),
            metrics: guard.metrics.clone(),
            last_error: guard.last_error.clone(),
        }
    }

    pub async fn page_state(&self) -> PageState {
        self.state.lock().await.page.clone()
    }

    pub async fn records(&self) -> Vec<E::Record> {
        self.state.lock().await.records.clone()
    }

    pub async fn metrics(&self) -> Option<StatusMetrics<E::Status>> {
        self.state.lock().await.metrics.clone()
    }

    /// Detaches the controller from its view; responses that arrive later are dropped.
    pub async fn close(&self) {
        self.state.lock().await.closed = true;
        debug!(entity = E::RESOURCE, "list: controller closed");
    }

    pub async fn load(&self, query: PageQuery) -> Result<(), ConsoleError> {
        self.fetch_page(query, self.options.page_size).await
    }

    pub async fn refresh(&self) -> Result<(), ConsoleError> {
        let query = self.state.lock().await.page.query();
        self.load(query).await
    }

    /// Loads page 1 with the bulk limit so that an export covers the whole collection.
    pub async fn load_bulk(&self) -> Result<(), ConsoleError> {
        let mut query = self.state.lock().await.page.query();
        query.page = 1;
        self.fetch_page(query, Some(self.options.metrics_limit)).await
    }

    pub async fn set_filter(
        &self,
        dimension: FilterDimension,
        value: Option<&str>,
    ) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        let value = self.guarded(normalize_filter::<E>(dimension, value)).await?;
        // Page state is committed only by a successful load.
        let mut query = self.state.lock().await.page.query();
        match value {
            Some(value) => {
                query.filters.insert(dimension, value);
            }
            None => {
                query.filters.remove(&dimension);
            }
        }
        query.page = 1;
        self.load(query).await
    }

    pub async fn set_search(&self, term: Option<&str>) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        let mut query = self.state.lock().await.page.query();
        query.search = term.map(str::to_string);
        query.page = 1;
        self.load(query).await
    }

    pub async fn set_page(&self, page: u32) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        let (mut query, total_pages) = {
            let guard = self.state.lock().await;
            (guard.page.query(), guard.page.total_pages)
        };
        if page < 1 || page > total_pages {
            return self
                .fail(ConsoleError::validation(format!(
                    "page {page} is out of range (1-{total_pages})"
                )))
                .await;
        }
        query.page = page;
        self.load(query).await
    }

    pub async fn detail(&self, id: &RecordId) -> Result<E::Record, ConsoleError> {
        self.ensure_open().await?;
        let value = self
            .guarded(self.authed(ApiRequest::get(E::item_path(id))).await)
            .await?;
        self.guarded(decode_single(value)).await
    }

    pub async fn mutate_status(&self, id: &RecordId, new_status: &str) -> Result<(), ConsoleError> {
        self.mutate_status_with_reason(id, new_status, None).await
    }

    pub async fn mutate_status_with_reason(
        &self,
        id: &RecordId,
        new_status: &str,
        reason: Option<&str>,
    ) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        let status = self.guarded(E::Status::parse_or_reject(new_status)).await?;
        self.apply_status_change(
            id,
            StatusChange {
                status,
                reason: reason.map(str::to_string),
            },
        )
        .await
    }

    pub async fn remove(&self, id: &RecordId) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        self.guarded(self.authed(ApiRequest::delete(E::item_path(id))).await)
            .await?;

        {
            let mut guard = self.state.lock().await;
            if guard.closed {
                debug!(entity = E::RESOURCE, id = %id, "mutation: delete finished after close");
                return Ok(());
            }
            guard.records.retain(|record| record.id() != id);
        }
        info!(entity = E::RESOURCE, id = %id, "mutation: record deleted");
        self.notifier
            .notify(Notification::success(format!("{} deleted", title(E::LABEL))));
        let _ = self.events.send(ListEvent::RecordRemoved { id: id.clone() });

        // The page itself is spliced locally; only the aggregate is refetched.
        let _ = self.compute_metrics().await;
        Ok(())
    }

    pub async fn compute_metrics(&self) -> Result<StatusMetrics<E::Status>, ConsoleError> {
        self.ensure_open().await?;
        let seq = {
            let mut guard = self.state.lock().await;
            guard.latest_metrics += 1;
            guard.latest_metrics
        };
        let _in_flight = InFlight::enter(&self.metrics_loads, LoadTarget::Metrics, &self.events);

        let request = ApiRequest::get(E::collection_path())
            .with_query("page", 1)
            .with_query("limit", self.options.metrics_limit);
        let result = async {
            let value = self.authed(request).await?;
            decode_envelope::<E::Record>(value)
        }
        .await;
        let envelope = match result {
            Ok(envelope) => envelope,
            Err(err) if !self.is_current(LoadTarget::Metrics, seq).await => {
                debug!(entity = E::RESOURCE, seq, "metrics: discarding superseded failure: {err}");
                return Err(err);
            }
            Err(err) => return self.fail(err).await,
        };

        if envelope.total_pages().unwrap_or(1) > 1 {
            warn!(
                entity = E::RESOURCE,
                limit = self.options.metrics_limit,
                "metrics: bulk fetch did not cover every record; counts are partial"
            );
        }
        let metrics = StatusMetrics::from_records(&envelope.data);

        let mut guard = self.state.lock().await;
        if guard.closed || seq != guard.latest_metrics {
            debug!(entity = E::RESOURCE, seq, "metrics: discarding superseded response");
            return Ok(metrics);
        }
        guard.metrics = Some(metrics.clone());
        drop(guard);

        debug!(entity = E::RESOURCE, total = metrics.total, "metrics: recomputed");
        let _ = self.events.send(ListEvent::MetricsUpdated {
            total: metrics.total,
        });
        Ok(metrics)
    }

    /// Rows for the records currently on screen, not the whole collection.
    pub async fn export_rows(&self) -> Vec<ExportRow> {
        self.state
            .lock()
            .await
            .records
            .iter()
            .map(ListRecord::export_row)
            .collect()
    }

    pub async fn export_table(&self) -> ExportTable {
        ExportTable::new(
            <E::Record as ListRecord>::EXPORT_HEADERS,
            self.export_rows().await,
        )
    }

    pub async fn export_csv(&self) -> Result<String, ConsoleError> {
        let table = self.export_table().await;
        self.guarded(table.to_csv()).await
    }

    pub async fn export_to_file(&self, dir: &Path) -> Result<PathBuf, ConsoleError> {
        let table = self.export_table().await;
        if table.is_empty() {
            return self
                .fail(ConsoleError::validation(format!(
                    "no {}s loaded to export",
                    E::LABEL
                )))
                .await;
        }
        let file_name = export_file_name(E::RESOURCE, Utc::now().date_naive());
        let path = self.guarded(table.write_csv(dir, &file_name)).await?;
        info!(entity = E::RESOURCE, path = %path.display(), rows = table.rows.len(), "export: csv written");
        self.notifier.notify(Notification::success(format!(
            "Exported {} {}s",
            table.rows.len(),
            E::LABEL
        )));
        Ok(path)
    }

    async fn fetch_page(&self, mut query: PageQuery, limit: Option<u32>) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        if query.page == 0 {
            return self
                .fail(ConsoleError::validation("page numbers start at 1"))
                .await;
        }
        query.filters = self
            .guarded(normalize_filters::<E>(&query.filters))
            .await?;
        query.search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_string);
        let seq = {
            let mut guard = self.state.lock().await;
            guard.latest_load += 1;
            guard.latest_load
        };
        let _in_flight = InFlight::enter(&self.list_loads, LoadTarget::List, &self.events);

        debug!(entity = E::RESOURCE, page = query.page, seq, "list: loading page");
        let request = list_request::<E>(&query, limit);
        let result = async {
            let value = self.authed(request).await?;
            decode_envelope::<E::Record>(value)
        }
        .await;
        let envelope = match result {
            Ok(envelope) => envelope,
            Err(err) if !self.is_current(LoadTarget::List, seq).await => {
                debug!(entity = E::RESOURCE, seq, "list: discarding superseded failure: {err}");
                return Ok(());
            }
            Err(err) => return self.fail(err).await,
        };

        let total_pages = envelope.total_pages().unwrap_or(1).max(1);
        let current_page = envelope
            .current_page()
            .unwrap_or(query.page)
            .clamp(1, total_pages);
        let count = envelope.data.len();

        let mut guard = self.state.lock().await;
        if guard.closed {
            debug!(entity = E::RESOURCE, seq, "list: discarding response for closed view");
            return Ok(());
        }
        if seq != guard.latest_load {
            debug!(
                entity = E::RESOURCE,
                seq,
                latest = guard.latest_load,
                "list: discarding superseded response"
            );
            return Ok(());
        }
        guard.records = envelope.data;
        guard.page.current_page = current_page;
        guard.page.total_pages = total_pages;
        guard.page.search = query.search;
        guard.page.filters = query.filters;
        guard.last_error = None;
        drop(guard);

        info!(
            entity = E::RESOURCE,
            page = current_page,
            total_pages,
            count,
            "list: page loaded"
        );
        let _ = self.events.send(ListEvent::PageLoaded {
            current_page,
            total_pages,
            count,
        });
        Ok(())
    }

    async fn apply_status_change(
        &self,
        id: &RecordId,
        change: StatusChange<E::Status>,
    ) -> Result<(), ConsoleError> {
        self.guarded(self.check_transition(id, &change).await).await?;
        let request = self.guarded(E::status_request(id, &change)).await?;
        self.guarded(self.authed(request).await).await?;

        if self.is_closed().await {
            return Ok(());
        }
        let status = change.status.as_str();
        info!(entity = E::RESOURCE, id = %id, status, "mutation: status updated");
        self.notifier.notify(Notification::success(format!(
            "{} status updated to {status}",
            title(E::LABEL)
        )));
        let _ = self.events.send(ListEvent::StatusChanged {
            id: id.clone(),
            status,
        });
        self.reload_all().await;
        Ok(())
    }

    async fn check_transition(
        &self,
        id: &RecordId,
        change: &StatusChange<E::Status>,
    ) -> Result<(), ConsoleError> {
        let status = change.status;
        let has_reason = change
            .reason
            .as_deref()
            .is_some_and(|reason| !reason.trim().is_empty());
        if status.requires_reason() && !has_reason {
            return Err(ConsoleError::validation(format!(
                "a reason is required to mark a {} as {}",
                E::LABEL,
                status.as_str()
            )));
        }

        let current = {
            let guard = self.state.lock().await;
            guard
                .records
                .iter()
                .find(|record| record.id() == id)
                .map(ListRecord::status)
        };
        match current {
            Some(current) if !current.can_transition_to(status) => {
                Err(ConsoleError::validation(format!(
                    "cannot change {} {id} from {} to {}",
                    E::LABEL,
                    current.as_str(),
                    status.as_str()
                )))
            }
            _ => Ok(()),
        }
    }

    /// Refetches the page and the aggregate side by side; each reports its own failure.
    async fn reload_all(&self) {
        let (_list, _metrics) = futures::join!(self.refresh(), self.compute_metrics());
    }

    async fn authed(&self, request: ApiRequest) -> Result<Value, ConsoleError> {
        let token = self.session.access_token()?;
        self.api.execute(&token, request).await
    }

    async fn ensure_open(&self) -> Result<(), ConsoleError> {
        if self.is_closed().await {
            return Err(ConsoleError::Closed);
        }
        Ok(())
    }

    /// False once the view is closed or a newer request of the same kind was issued.
    async fn is_current(&self, target: LoadTarget, seq: u64) -> bool {
        let guard = self.state.lock().await;
        let latest = match target {
            LoadTarget::List => guard.latest_load,
            LoadTarget::Metrics => guard.latest_metrics,
        };
        !guard.closed && seq == latest
    }

    async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    async fn guarded<T>(&self, result: Result<T, ConsoleError>) -> Result<T, ConsoleError> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => self.fail(err).await,
        }
    }

    async fn fail<T>(&self, err: ConsoleError) -> Result<T, ConsoleError> {
        {
            let mut guard = self.state.lock().await;
            if guard.closed {
                debug!(entity = E::RESOURCE, "list: suppressing error for closed view: {err}");
                return Err(err);
            }
            guard.last_error = Some(err.clone());
        }
        warn!(entity = E::RESOURCE, category = ?err.category(), "list: operation failed: {err}");
        self.notifier.notify(Notification::error(&err));
        Err(err)
    }
}

impl ListController<ContactMessages> {
    pub async fn reply(&self, id: &RecordId, draft: &ReplyDraft) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        self.guarded(draft.validate()).await?;
        let request = self
            .guarded(
                ApiRequest::post(format!("{}/reply", ContactMessages::item_path(id)))
                    .with_json(&draft.to_request()),
            )
            .await?;
        self.guarded(self.authed(request).await).await?;

        info!(entity = ContactMessages::RESOURCE, id = %id, "mutation: reply sent");
        self.notifier.notify(Notification::success("Reply sent"));
        self.reload_all().await;
        Ok(())
    }
}

impl ListController<InfluencerApplications> {
    pub async fn approve(&self, id: &RecordId) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        self.apply_status_change(
            id,
            StatusChange {
                status: ApplicationStatus::Approved,
                reason: None,
            },
        )
        .await
    }

    /// Blocked locally, without a request, while the reason is blank.
    pub async fn reject(&self, id: &RecordId, draft: &RejectionDraft) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        self.guarded(draft.validate()).await?;
        self.apply_status_change(
            id,
            StatusChange {
                status: ApplicationStatus::Rejected,
                reason: Some(draft.reason.trim().to_string()),
            },
        )
        .await
    }
}

impl ListController<InfluencerPartners> {
    pub async fn resend_credentials(&self, id: &RecordId) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        let request = ApiRequest::post(format!(
            "{}/resend-credentials",
            InfluencerPartners::item_path(id)
        ));
        self.guarded(self.authed(request).await).await?;

        info!(entity = InfluencerPartners::RESOURCE, id = %id, "mutation: credentials resent");
        self.notifier
            .notify(Notification::success("Login credentials sent to partner"));
        Ok(())
    }

    pub async fn create(&self, draft: &PartnerDraft) -> Result<(), ConsoleError> {
        self.ensure_open().await?;
        self.guarded(draft.validate()).await?;
        let request = self
            .guarded(
                ApiRequest::post(InfluencerPartners::collection_path())
                    .with_json(&draft.to_request()),
            )
            .await?;
        self.guarded(self.authed(request).await).await?;

        info!(entity = InfluencerPartners::RESOURCE, "mutation: partner created");
        self.notifier.notify(Notification::success("Partner created"));
        self.reload_all().await;
        Ok(())
    }
}

fn list_request<E: EntityKind>(query: &PageQuery, limit: Option<u32>) -> ApiRequest {
    let mut request = ApiRequest::get(E::collection_path()).with_query("page", query.page);
    if let Some(limit) = limit {
        request = request.with_query("limit", limit);
    }
    if let Some(search) = &query.search {
        request = request.with_query("search", search);
    }
    for (dimension, value) in &query.filters {
        request = request.with_query(dimension.query_key(), value);
    }
    request
}

fn normalize_filter<E: EntityKind>(
    dimension: FilterDimension,
    value: Option<&str>,
) -> Result<Option<String>, ConsoleError> {
    if !E::FILTERS.contains(&dimension) {
        return Err(ConsoleError::validation(format!(
            "{}s cannot be filtered by {dimension}",
            E::LABEL
        )));
    }
    let Some(value) = value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case("all"))
    else {
        return Ok(None);
    };

    let normalized = match dimension {
        FilterDimension::Status => E::Status::parse_or_reject(value)?.as_str().to_string(),
        FilterDimension::FollowerRange => FollowerRange::parse(value)
            .ok_or_else(|| {
                ConsoleError::validation(format!("invalid follower range '{value}'"))
            })?
            .as_str()
            .to_string(),
        FilterDimension::Platform => value.to_ascii_lowercase(),
    };
    Ok(Some(normalized))
}

fn normalize_filters<E: EntityKind>(filters: &ListFilters) -> Result<ListFilters, ConsoleError> {
    let mut normalized = ListFilters::new();
    for (dimension, value) in filters {
        if let Some(value) = normalize_filter::<E>(*dimension, Some(value))? {
            normalized.insert(*dimension, value);
        }
    }
    Ok(normalized)
}

fn decode_envelope<R: DeserializeOwned>(value: Value) -> Result<ListEnvelope<R>, ConsoleError> {
    if value.is_array() {
        return Ok(ListEnvelope {
            success: None,
            data: serde_json::from_value(value)?,
            pagination: None,
            current_page: None,
            total_pages: None,
        });
    }
    Ok(serde_json::from_value(value)?)
}

fn decode_single<R: DeserializeOwned>(value: Value) -> Result<R, ConsoleError> {
    match value.get("data") {
        Some(data) => Ok(serde_json::from_value(data.clone())?),
        None => Ok(serde_json::from_value(value)?),
    }
}

fn title(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
