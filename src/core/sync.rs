//! Offline-first sync engine.
//!
//! Every clock action applies locally first. When the server cannot be
//! reached the record joins a persisted queue and is replayed later, in
//! order: records without a clock-out replay as creates, completed ones
//! as updates. A record that fails to replay simply stays queued for the
//! next pass; there is no backoff and no classification of failures.

use std::collections::VecDeque;

use chrono::NaiveTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::EmsApi;
use crate::config::Identity;
use crate::core::duration;
use crate::core::rollover::{self, DayRollover};
use crate::core::session::AttendanceSession;
use crate::errors::{AppError, AppResult};
use crate::models::AttendanceRecord;
use crate::store::StateStore;
use crate::utils::{date, time};

/// How a clock action landed.
#[derive(Debug)]
pub enum ClockOutcome {
    /// Accepted by the server.
    Synced(AttendanceRecord),
    /// Recorded locally, waiting for the server to come back.
    Queued(AttendanceRecord),
}

impl ClockOutcome {
    pub fn record(&self) -> &AttendanceRecord {
        match self {
            ClockOutcome::Synced(r) | ClockOutcome::Queued(r) => r,
        }
    }

    pub fn is_queued(&self) -> bool {
        matches!(self, ClockOutcome::Queued(_))
    }
}

/// Result of one reconcile pass over the offline queue.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub attempted: usize,
    pub replayed: usize,
    pub remaining: usize,
}

/// Attendance history, depending on whether the server answered.
#[derive(Debug)]
pub enum History {
    Remote(Vec<AttendanceRecord>),
    Local(Vec<AttendanceRecord>),
}

pub struct SyncEngine<A, S> {
    api: A,
    store: S,
    session: AttendanceSession,
    employee: Identity,
    /// None until the first remote call settles it.
    online: Option<bool>,
}

impl<A: EmsApi, S: StateStore> SyncEngine<A, S> {
    pub fn new(api: A, store: S, employee: Identity) -> Self {
        let session = AttendanceSession::load(&store, &employee.id, date::today());
        Self {
            api,
            store,
            session,
            employee,
            online: None,
        }
    }

    pub fn session(&self) -> &AttendanceSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn employee(&self) -> &Identity {
        &self.employee
    }

    /// Number of records waiting in the offline queue.
    pub fn pending(&self) -> usize {
        self.store.load_queue().len()
    }

    /// Record the clock-in punch for today.
    ///
    /// The session guard runs before anything else: an illegal transition
    /// makes no network call and changes no state. On server failure the
    /// record gets a client-side id, joins the queue and the session still
    /// moves to checked-in.
    pub async fn clock_in(&mut self, at: Option<NaiveTime>) -> AppResult<ClockOutcome> {
        self.session.guard_clock_in()?;

        let time_in = time::format_time(at.unwrap_or_else(time::now_time));
        let mut record = AttendanceRecord::clock_in(&self.employee.id, date::today(), &time_in);

        match self.api.create_attendance(&record).await {
            Ok(created) => {
                self.note_online();
                record.id = created.id;
                record.synced = true;
                self.store.save_today(&record);
                self.session.set_today(record.clone());
                self.drain_queue().await;
                Ok(ClockOutcome::Synced(record))
            }
            Err(err) => {
                self.note_offline(&err);
                record.id = Some(Uuid::new_v4().to_string());
                self.store.push_queued(&record);
                self.store.save_today(&record);
                self.session.set_today(record.clone());
                Ok(ClockOutcome::Queued(record))
            }
        }
    }

    /// Record the clock-out punch and the worked duration.
    pub async fn clock_out(&mut self, at: Option<NaiveTime>) -> AppResult<ClockOutcome> {
        let open = self.session.guard_clock_out()?.clone();
        let id = open
            .id
            .clone()
            .ok_or_else(|| AppError::InvalidRecord("no usable record id for today".to_string()))?;

        let time_out = time::format_time(at.unwrap_or_else(time::now_time));
        let worked = duration::work_duration(&open.time_in, Some(&time_out));
        let mut record = open;
        record.close(&time_out, worked.hours, worked.minutes);

        match self.api.update_attendance(&id, &record).await {
            Ok(_) => {
                self.note_online();
                record.synced = true;
                self.store.save_today(&record);
                self.session.set_today(record.clone());
                self.drain_queue().await;
                Ok(ClockOutcome::Synced(record))
            }
            Err(err) => {
                self.note_offline(&err);
                record.synced = false;
                self.store.push_queued(&record);
                self.store.save_today(&record);
                self.session.set_today(record.clone());
                Ok(ClockOutcome::Queued(record))
            }
        }
    }

    /// Replay the offline queue against the server, oldest first.
    ///
    /// An empty queue is a strict no-op. Each entry is replayed on its
    /// own; a failure keeps that entry queued and never blocks the rest.
    /// The persisted queue is trimmed after every success so an
    /// interrupted pass cannot replay a confirmed record twice.
    pub async fn reconcile(&mut self) -> ReconcileReport {
        let queue = self.store.load_queue();
        if queue.is_empty() {
            return ReconcileReport::default();
        }

        let attempted = queue.len();
        info!("reconciling {attempted} queued record(s)");
        let mut pending: VecDeque<AttendanceRecord> = queue.into();
        let mut kept: Vec<AttendanceRecord> = Vec::new();
        let mut replayed = 0usize;

        while let Some(record) = pending.pop_front() {
            let outcome = match (record.time_out.is_empty(), record.id.as_deref()) {
                (true, _) => self.api.create_attendance(&record).await.map(|_| ()),
                (false, Some(id)) => self.api.update_attendance(id, &record).await.map(|_| ()),
                (false, None) => {
                    // Cannot be replayed, ever. Queued entries always get
                    // an id before queuing; drop the stray.
                    warn!("dropping queued record without id ({})", record.date);
                    self.persist_queue_progress(&kept, &pending);
                    continue;
                }
            };

            match outcome {
                Ok(()) => {
                    replayed += 1;
                    self.note_online();
                    if let Some(id) = record.id.as_deref()
                        && let Some(confirmed) = self.session.confirm_synced(id, &record.time_out)
                    {
                        self.store.save_today(&confirmed);
                    }
                    self.persist_queue_progress(&kept, &pending);
                }
                Err(err) => {
                    self.note_offline(&err);
                    debug!("record stays queued: {err}");
                    kept.push(record);
                }
            }
        }

        ReconcileReport {
            attempted,
            replayed,
            remaining: kept.len(),
        }
    }

    /// Reload today's record from the server, adopting whatever is there.
    pub async fn refresh_today(&mut self) -> AppResult<()> {
        let today = date::today();
        let records = match self.api.list_attendance().await {
            Ok(records) => {
                self.note_online();
                records
            }
            Err(err) => {
                self.note_offline(&err);
                return Err(err);
            }
        };

        let found = records
            .into_iter()
            .find(|r| r.employee_id == self.employee.id && r.date == today);
        match found {
            Some(mut record) => {
                record.synced = true;
                self.store.save_today(&record);
                self.session.set_today(record);
            }
            None => {
                self.store.clear_today();
                self.session.reset();
            }
        }
        Ok(())
    }

    /// Detect a calendar day change and start a fresh attendance cycle.
    /// Returns true when a rollover happened.
    pub async fn check_rollover(&mut self) -> bool {
        match rollover::observe(&self.store, date::today()) {
            DayRollover::Unchanged | DayRollover::Seeded => false,
            DayRollover::Rolled { .. } => {
                self.session.reset();
                if let Err(err) = self.refresh_today().await {
                    warn!("could not reload today's record after rollover: {err}");
                }
                true
            }
        }
    }

    /// The employee's attendance history, remote when reachable, local
    /// (today's snapshot plus the queue) otherwise. A non-empty queue is
    /// reconciled first so the listing reflects replayed records.
    pub async fn history(&mut self) -> History {
        if !self.store.load_queue().is_empty() {
            self.reconcile().await;
        }

        match self.api.list_attendance().await {
            Ok(records) => {
                self.note_online();
                let mut own: Vec<AttendanceRecord> = records
                    .into_iter()
                    .filter(|r| r.employee_id == self.employee.id)
                    .map(|mut r| {
                        r.synced = true;
                        r
                    })
                    .collect();
                sort_records(&mut own);
                History::Remote(own)
            }
            Err(err) => {
                self.note_offline(&err);
                History::Local(self.local_history())
            }
        }
    }

    /// Local fallback listing: queued records overlaid with today's
    /// snapshot, newest stage of each record winning.
    fn local_history(&self) -> Vec<AttendanceRecord> {
        let mut records: Vec<AttendanceRecord> = Vec::new();
        for record in self.store.load_queue() {
            if record.employee_id != self.employee.id {
                continue;
            }
            merge_record(&mut records, record);
        }
        if let Some(today) = self.session.today() {
            merge_record(&mut records, today.clone());
        }
        sort_records(&mut records);
        records
    }

    /// Opportunistic replay after any call proved the server reachable.
    async fn drain_queue(&mut self) {
        if !self.store.load_queue().is_empty() {
            self.reconcile().await;
        }
    }

    fn persist_queue_progress(
        &self,
        kept: &[AttendanceRecord],
        pending: &VecDeque<AttendanceRecord>,
    ) {
        let survivors: Vec<AttendanceRecord> = kept
            .iter()
            .cloned()
            .chain(pending.iter().cloned())
            .collect();
        self.store.save_queue(&survivors);
    }

    fn note_online(&mut self) {
        if self.online == Some(false) {
            info!("server connection restored");
        }
        self.online = Some(true);
    }

    fn note_offline(&mut self, err: &AppError) {
        if self.online != Some(false) {
            warn!("server unreachable, working offline: {err}");
        }
        self.online = Some(false);
    }
}

fn sort_records(records: &mut [AttendanceRecord]) {
    records.sort_by(|a, b| (a.date, a.time_in.as_str()).cmp(&(b.date, b.time_in.as_str())));
}

/// Replace an earlier stage of the same record, append otherwise.
fn merge_record(records: &mut Vec<AttendanceRecord>, record: AttendanceRecord) {
    if record.id.is_some()
        && let Some(slot) = records.iter_mut().find(|r| r.id == record.id)
    {
        *slot = record;
        return;
    }
    records.push(record);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StateStore};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::models::{Department, Employee, LeaveRequest};

    #[derive(Default)]
    struct MockState {
        online: Cell<bool>,
        remote: RefCell<Vec<AttendanceRecord>>,
        calls: RefCell<Vec<String>>,
        next_id: Cell<u32>,
    }

    /// Scripted stand-in for the HTTP client. Cloning shares state so a
    /// test can flip connectivity after the engine took ownership.
    #[derive(Clone, Default)]
    struct MockApi {
        state: Rc<MockState>,
    }

    impl MockApi {
        fn online() -> Self {
            let api = MockApi::default();
            api.state.online.set(true);
            api.state.next_id.set(1);
            api
        }

        fn offline() -> Self {
            let api = MockApi::online();
            api.state.online.set(false);
            api
        }

        fn set_online(&self, on: bool) {
            self.state.online.set(on);
        }

        fn calls(&self) -> Vec<String> {
            self.state.calls.borrow().clone()
        }

        fn remote(&self) -> Vec<AttendanceRecord> {
            self.state.remote.borrow().clone()
        }

        fn seed_remote(&self, record: AttendanceRecord) {
            self.state.remote.borrow_mut().push(record);
        }

        fn gate(&self) -> AppResult<()> {
            if self.state.online.get() {
                Ok(())
            } else {
                Err(AppError::Api {
                    status: 503,
                    message: "connection refused".to_string(),
                })
            }
        }
    }

    impl EmsApi for MockApi {
        async fn list_attendance(&self) -> AppResult<Vec<AttendanceRecord>> {
            self.state.calls.borrow_mut().push("list".to_string());
            self.gate()?;
            Ok(self.remote())
        }

        async fn create_attendance(
            &self,
            record: &AttendanceRecord,
        ) -> AppResult<AttendanceRecord> {
            self.state
                .calls
                .borrow_mut()
                .push(format!("create {}", record.time_in));
            self.gate()?;
            let mut created = record.clone();
            if created.id.is_none() {
                let n = self.state.next_id.get();
                self.state.next_id.set(n + 1);
                created.id = Some(format!("srv-{n}"));
            }
            created.synced = false;
            self.state.remote.borrow_mut().push(created.clone());
            Ok(created)
        }

        async fn update_attendance(
            &self,
            id: &str,
            record: &AttendanceRecord,
        ) -> AppResult<AttendanceRecord> {
            self.state.calls.borrow_mut().push(format!("update {id}"));
            self.gate()?;
            let mut remote = self.state.remote.borrow_mut();
            match remote.iter_mut().find(|r| r.id.as_deref() == Some(id)) {
                Some(slot) => {
                    let mut updated = record.clone();
                    updated.id = Some(id.to_string());
                    updated.synced = false;
                    *slot = updated.clone();
                    Ok(updated)
                }
                None => Err(AppError::Api {
                    status: 404,
                    message: "not found".to_string(),
                }),
            }
        }

        async fn list_employees(&self) -> AppResult<Vec<Employee>> {
            unreachable!("directory calls are not part of these tests")
        }

        async fn list_departments(&self) -> AppResult<Vec<Department>> {
            unreachable!("directory calls are not part of these tests")
        }

        async fn list_leaves(&self) -> AppResult<Vec<LeaveRequest>> {
            unreachable!("directory calls are not part of these tests")
        }

        async fn create_leave(&self, _request: &LeaveRequest) -> AppResult<LeaveRequest> {
            unreachable!("directory calls are not part of these tests")
        }

        async fn delete_leave(&self, _id: &str) -> AppResult<()> {
            unreachable!("directory calls are not part of these tests")
        }
    }

    fn identity() -> Identity {
        Identity {
            id: "E1".to_string(),
            name: "Dana Kim".to_string(),
        }
    }

    fn engine_with(api: MockApi) -> SyncEngine<MockApi, MemoryStore> {
        SyncEngine::new(api, MemoryStore::new(), identity())
    }

    fn at(s: &str) -> Option<NaiveTime> {
        Some(s.parse().unwrap())
    }

    #[tokio::test]
    async fn clock_in_online_adopts_server_id() {
        let api = MockApi::online();
        let mut engine = engine_with(api.clone());

        let outcome = engine.clock_in(at("09:00:00")).await.unwrap();
        assert!(!outcome.is_queued());
        assert_eq!(outcome.record().id.as_deref(), Some("srv-1"));
        assert!(outcome.record().synced);

        assert_eq!(engine.pending(), 0);
        let snapshot = engine.store().load_today().unwrap();
        assert!(snapshot.synced);
        assert_eq!(api.remote().len(), 1);
    }

    #[tokio::test]
    async fn clock_in_offline_queues_with_local_id() {
        let api = MockApi::offline();
        let mut engine = engine_with(api.clone());

        let outcome = engine.clock_in(at("09:00:00")).await.unwrap();
        assert!(outcome.is_queued());
        assert!(outcome.record().id.is_some());
        assert!(!outcome.record().synced);

        assert_eq!(engine.pending(), 1);
        let snapshot = engine.store().load_today().unwrap();
        assert!(snapshot.is_open());
        assert!(!snapshot.synced);
        assert!(api.remote().is_empty());
    }

    #[tokio::test]
    async fn illegal_clock_out_makes_no_network_call() {
        let api = MockApi::online();
        let mut engine = engine_with(api.clone());

        let err = engine.clock_out(at("17:30:00")).await.unwrap_err();
        assert!(matches!(err, AppError::NotCheckedIn));
        assert!(api.calls().is_empty());
        assert!(engine.store().load_today().is_none());
    }

    #[tokio::test]
    async fn double_clock_in_makes_no_network_call() {
        let api = MockApi::online();
        let mut engine = engine_with(api.clone());
        engine.clock_in(at("09:00:00")).await.unwrap();
        let calls_before = api.calls().len();

        let err = engine.clock_in(at("10:00:00")).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyCheckedIn(_)));
        assert_eq!(api.calls().len(), calls_before);
        assert_eq!(api.remote().len(), 1);
    }

    #[tokio::test]
    async fn offline_cycle_replays_in_order_and_converges() {
        let api = MockApi::offline();
        let mut engine = engine_with(api.clone());

        engine.clock_in(at("09:00:00")).await.unwrap();
        engine.clock_out(at("17:30:00")).await.unwrap();
        assert_eq!(engine.pending(), 2);
        let local_id = engine.store().load_today().unwrap().id.unwrap();

        api.set_online(true);
        let report = engine.reconcile().await;
        assert_eq!(
            report,
            ReconcileReport {
                attempted: 2,
                replayed: 2,
                remaining: 0
            }
        );

        // One remote record: the replayed create, then the update on it.
        let remote = api.remote();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].id.as_deref(), Some(local_id.as_str()));
        assert!(remote[0].is_complete());
        assert_eq!(remote[0].workinghours, 8);
        assert_eq!(remote[0].workingminutes, 30);

        assert_eq!(engine.pending(), 0);
        assert!(engine.store().load_today().unwrap().synced);
    }

    #[tokio::test]
    async fn reconcile_with_empty_queue_makes_no_calls() {
        let api = MockApi::online();
        let mut engine = engine_with(api.clone());

        let report = engine.reconcile().await;
        assert_eq!(report, ReconcileReport::default());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_replay_keeps_record_queued() {
        let api = MockApi::offline();
        let mut engine = engine_with(api.clone());
        engine.clock_in(at("09:00:00")).await.unwrap();

        let report = engine.reconcile().await;
        assert_eq!(report.attempted, 1);
        assert_eq!(report.replayed, 0);
        assert_eq!(report.remaining, 1);
        assert_eq!(engine.pending(), 1);
    }

    #[tokio::test]
    async fn replay_failure_does_not_block_later_records() {
        let api = MockApi::online();
        let store = MemoryStore::new();

        // An update for a record the server never saw fails with 404 and
        // must not stop the create that follows it in the queue.
        let mut ghost = AttendanceRecord::clock_in("E1", date::today(), "08:00:00");
        ghost.id = Some("ghost".to_string());
        ghost.close("16:00:00", 8, 0);
        store.push_queued(&ghost);

        let mut fresh = AttendanceRecord::clock_in("E1", date::today(), "09:00:00");
        fresh.id = Some("local-1".to_string());
        store.push_queued(&fresh);

        let mut engine = SyncEngine::new(api.clone(), store, identity());
        let report = engine.reconcile().await;
        assert_eq!(report.attempted, 2);
        assert_eq!(report.replayed, 1);
        assert_eq!(report.remaining, 1);

        let queue = engine.store().load_queue();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id.as_deref(), Some("ghost"));
    }

    #[tokio::test]
    async fn rollover_resets_and_refreshes_from_server() {
        let api = MockApi::online();
        let store = MemoryStore::new();
        let yesterday = date::today().pred_opt().unwrap();
        store.set_last_checked_date(yesterday);

        let mut engine = SyncEngine::new(api.clone(), store, identity());
        assert!(engine.check_rollover().await);
        assert_eq!(engine.store().last_checked_date(), Some(date::today()));
        assert!(api.calls().contains(&"list".to_string()));

        // Same day again: nothing to do, no extra network traffic.
        let calls_before = api.calls().len();
        assert!(!engine.check_rollover().await);
        assert_eq!(api.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn history_offline_merges_queue_and_today() {
        let api = MockApi::offline();
        let mut engine = engine_with(api.clone());
        engine.clock_in(at("09:00:00")).await.unwrap();

        match engine.history().await {
            History::Local(records) => {
                assert_eq!(records.len(), 1);
                assert!(records[0].is_open());
            }
            History::Remote(_) => panic!("server is down, history must be local"),
        }
    }

    #[tokio::test]
    async fn history_online_filters_other_employees() {
        let api = MockApi::online();
        let mut other = AttendanceRecord::clock_in("E2", date::today(), "08:00:00");
        other.id = Some("x1".to_string());
        api.seed_remote(other);
        let mut own = AttendanceRecord::clock_in("E1", date::today(), "09:00:00");
        own.id = Some("x2".to_string());
        api.seed_remote(own);

        let mut engine = engine_with(api.clone());
        match engine.history().await {
            History::Remote(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].employee_id, "E1");
                assert!(records[0].synced);
            }
            History::Local(_) => panic!("server is up, history must be remote"),
        }
    }

    #[tokio::test]
    async fn clock_out_after_offline_clock_in_converges_on_next_pass() {
        let api = MockApi::offline();
        let mut engine = engine_with(api.clone());
        engine.clock_in(at("09:00:00")).await.unwrap();
        assert_eq!(engine.pending(), 1);

        // Server is back, but its copy of today's record only appears
        // once the queued create replays. The direct update misses and
        // the clock-out joins the queue behind the create.
        api.set_online(true);
        let outcome = engine.clock_out(at("17:30:00")).await.unwrap();
        assert!(outcome.is_queued());
        assert_eq!(engine.pending(), 2);

        let report = engine.reconcile().await;
        assert_eq!(report.replayed, 2);
        assert_eq!(engine.pending(), 0);
        let remote = api.remote();
        assert_eq!(remote.len(), 1);
        assert!(remote[0].is_complete());
    }

    #[tokio::test]
    async fn successful_clock_in_drains_an_older_queue() {
        let api = MockApi::online();
        let store = MemoryStore::new();

        // Yesterday's clock-out never made it out. It replays as an
        // update, so the server already knows the open record.
        let yesterday = date::today().pred_opt().unwrap();
        let mut stale = AttendanceRecord::clock_in("E1", yesterday, "09:00:00");
        stale.id = Some("local-old".to_string());
        stale.close("17:00:00", 8, 0);
        let mut remote_stale = stale.clone();
        remote_stale.time_out = String::new();
        api.seed_remote(remote_stale);
        store.push_queued(&stale);

        let mut engine = SyncEngine::new(api.clone(), store, identity());
        let outcome = engine.clock_in(at("09:00:00")).await.unwrap();
        assert!(!outcome.is_queued());
        assert_eq!(engine.pending(), 0);
        assert!(api.calls().iter().any(|c| c == "update local-old"));
    }
}
