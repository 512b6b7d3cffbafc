//! Board subscription fan-out
//!
//! A [`BoardWatcher`] keeps one live feed on a board's lists and one live
//! feed per list on that list's tasks, reconciling the set of task feeds on
//! every lists update: lists that appeared get a feed, lists that vanished
//! get theirs detached. Feed guards are held in a registry keyed by list id,
//! so every subscription is released exactly once, either when its list
//! disappears or when the watcher detaches.
//!
//! The watcher also maintains in-memory mirrors of the watched collections.
//! Mirrors are caches of the last delivered snapshots; the feeds stay the
//! source of truth.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};

use crate::db::StoreGateway;
use crate::db::models::{List, Task};
use crate::db::repository::{BOARD_TABLE, make_thing};
use crate::sync::FeedGuard;

#[derive(Debug)]
pub struct BoardWatcher {
    board_id: String,
    lists: Arc<RwLock<Vec<List>>>,
    tasks_by_list: Arc<DashMap<String, Vec<Task>>>,
    task_feeds: Arc<Mutex<HashMap<String, FeedGuard>>>,
    lists_feed: FeedGuard,
}

impl BoardWatcher {
    /// Start watching a board's hierarchy
    pub fn attach(gateway: &Arc<StoreGateway>, board_id: &str) -> Self {
        let board_id = make_thing(BOARD_TABLE, board_id).to_string();
        let lists = Arc::new(RwLock::new(Vec::new()));
        let tasks_by_list: Arc<DashMap<String, Vec<Task>>> = Arc::new(DashMap::new());
        let task_feeds: Arc<Mutex<HashMap<String, FeedGuard>>> =
            Arc::new(Mutex::new(HashMap::new()));

        let lists_feed = {
            let task_gateway = gateway.clone();
            let lists = lists.clone();
            let tasks_by_list = tasks_by_list.clone();
            let task_feeds = task_feeds.clone();

            gateway.subscribe_lists(&board_id, move |current| {
                let present: HashSet<String> =
                    current.iter().filter_map(|l| l.record_id()).collect();
                *lists.write() = current;

                let mut feeds = task_feeds.lock();

                // Detach feeds of lists that no longer exist; dropping the
                // guard cancels the feed.
                feeds.retain(|list_id, _| {
                    let keep = present.contains(list_id);
                    if !keep {
                        tasks_by_list.remove(list_id);
                    }
                    keep
                });

                // Attach feeds for lists seen for the first time.
                for list_id in present {
                    if !feeds.contains_key(&list_id) {
                        let mirror = tasks_by_list.clone();
                        let key = list_id.clone();
                        let guard = task_gateway.subscribe_tasks(&list_id, move |tasks| {
                            mirror.insert(key.clone(), tasks);
                        });
                        feeds.insert(list_id, guard);
                    }
                }
            })
        };

        Self {
            board_id,
            lists,
            tasks_by_list,
            task_feeds,
            lists_feed,
        }
    }

    /// The watched board's record id ("board:x")
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    /// Last delivered lists snapshot
    pub fn lists_snapshot(&self) -> Vec<List> {
        self.lists.read().clone()
    }

    /// Last delivered tasks snapshot of one list, if that list is watched
    pub fn tasks_snapshot(&self, list_id: &str) -> Option<Vec<Task>> {
        self.tasks_by_list.get(list_id).map(|t| t.clone())
    }

    /// Record ids of the lists currently holding a task feed
    pub fn watched_lists(&self) -> Vec<String> {
        self.task_feeds.lock().keys().cloned().collect()
    }

    /// Release every feed held by this watcher
    ///
    /// Also runs on drop; calling it twice is harmless.
    pub fn detach(&self) {
        self.lists_feed.unsubscribe();
        self.task_feeds.lock().clear();
        self.tasks_by_list.clear();
    }
}

impl Drop for BoardWatcher {
    fn drop(&mut self) {
        self.detach();
    }
}
