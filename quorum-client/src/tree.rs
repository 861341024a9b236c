use std::collections::{HashMap, HashSet};

use crate::api::{Reply, ReplyId};

/// Parent-indexed forest of one thread's replies.
///
/// This is a pure function of the reply collection: rebuild it whenever the
/// collection changes identity (a new fetch), there is no hidden state to
/// refresh. Rendering consumes the `(reply, depth)` sequence from [`walk`]
/// and never touches the grouping itself.
///
/// [`walk`]: ReplyTree::walk
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ReplyTree {
    children: HashMap<Option<ReplyId>, Vec<Reply>>,
}

impl ReplyTree {
    pub fn build(replies: &[Reply]) -> ReplyTree {
        let known = replies.iter().map(|r| r.id).collect::<HashSet<_>>();
        let mut children: HashMap<Option<ReplyId>, Vec<Reply>> = HashMap::new();
        for r in replies {
            let parent = match r.parent_id {
                Some(p) if known.contains(&p) => Some(p),
                // The server validates parents at creation, but nothing
                // guarantees what it sends back later: a dangling parent
                // makes the reply a root instead of a crash.
                Some(p) => {
                    tracing::warn!(
                        reply = r.id.0,
                        parent = p.0,
                        "promoting reply with unresolvable parent to top level"
                    );
                    None
                }
                None => None,
            };
            children.entry(parent).or_insert_with(Vec::new).push(r.clone());
        }
        for group in children.values_mut() {
            // Stable sort: equal timestamps keep the order the server sent
            group.sort_by_key(|r| r.created_at);
        }
        ReplyTree { children }
    }

    pub fn roots(&self) -> &[Reply] {
        self.group(None)
    }

    pub fn children_of(&self, id: ReplyId) -> &[Reply] {
        self.group(Some(id))
    }

    fn group(&self, parent: Option<ReplyId>) -> &[Reply] {
        self.children.get(&parent).map(|v| &v[..]).unwrap_or(&[])
    }

    /// Depth-first `(reply, depth)` sequence for indented rendering; roots are
    /// at depth 0 and depth grows by exactly 1 per nesting level.
    ///
    /// Every reply appears exactly once even on malformed input: a visited set
    /// guards against parent cycles, and replies a cycle makes unreachable
    /// from any root are emitted at depth 0 rather than dropped.
    pub fn walk(&self) -> Vec<(&Reply, usize)> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.expand(None, 0, &mut seen, &mut out);

        if out.len() < self.len() {
            let mut unreachable = self
                .children
                .values()
                .flatten()
                .filter(|r| !seen.contains(&r.id))
                .collect::<Vec<_>>();
            unreachable.sort_by_key(|r| (r.created_at, r.id));
            for r in unreachable {
                if seen.insert(r.id) {
                    tracing::warn!(reply = r.id.0, "reply unreachable from any root, emitting at top level");
                    out.push((r, 0));
                    self.expand(Some(r.id), 1, &mut seen, &mut out);
                }
            }
        }

        out
    }

    pub fn len(&self) -> usize {
        self.children.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn expand<'a>(
        &'a self,
        parent: Option<ReplyId>,
        depth: usize,
        seen: &mut HashSet<ReplyId>,
        out: &mut Vec<(&'a Reply, usize)>,
    ) {
        for r in self.group(parent) {
            if !seen.insert(r.id) {
                continue;
            }
            out.push((r, depth));
            self.expand(Some(r.id), depth + 1, seen, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ThreadId, Time};
    use chrono::TimeZone;

    fn at(minute: u32) -> Time {
        chrono::Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap()
    }

    fn reply(id: i64, parent: Option<i64>, created_at: Time) -> Reply {
        Reply {
            id: ReplyId(id),
            thread_id: ThreadId(1),
            parent_id: parent.map(ReplyId),
            body: format!("reply {}", id),
            author_name: None,
            is_anonymous: true,
            created_at,
        }
    }

    fn walked_ids(tree: &ReplyTree) -> Vec<(i64, usize)> {
        tree.walk().iter().map(|(r, d)| (r.id.0, *d)).collect()
    }

    #[test]
    fn root_order_and_children() {
        // R1 (root, 10:00), R2 (under R1, 10:05), R3 (root, 10:02)
        let replies = vec![
            reply(2, Some(1), at(5)),
            reply(1, None, at(0)),
            reply(3, None, at(2)),
        ];
        let tree = ReplyTree::build(&replies);
        assert_eq!(
            tree.roots().iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![ReplyId(1), ReplyId(3)],
        );
        assert_eq!(
            tree.children_of(ReplyId(1)).iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![ReplyId(2)],
        );
        assert_eq!(walked_ids(&tree), vec![(1, 0), (2, 1), (3, 0)]);
    }

    #[test]
    fn deep_nesting_increments_depth_by_one() {
        let replies = vec![
            reply(1, None, at(0)),
            reply(2, Some(1), at(1)),
            reply(3, Some(2), at(2)),
            reply(4, Some(3), at(3)),
        ];
        let tree = ReplyTree::build(&replies);
        assert_eq!(walked_ids(&tree), vec![(1, 0), (2, 1), (3, 2), (4, 3)]);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let t = at(0);
        let replies = vec![
            reply(30, None, t),
            reply(10, None, t),
            reply(20, None, t),
        ];
        let tree = ReplyTree::build(&replies);
        assert_eq!(walked_ids(&tree), vec![(30, 0), (10, 0), (20, 0)]);
    }

    #[test]
    fn orphan_is_promoted_to_root() {
        let replies = vec![
            reply(1, None, at(0)),
            // parent 99 does not exist anywhere in the thread
            reply(2, Some(99), at(1)),
        ];
        let tree = ReplyTree::build(&replies);
        assert_eq!(walked_ids(&tree), vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn every_reply_appears_exactly_once() {
        let replies = vec![
            reply(1, None, at(0)),
            reply(2, Some(1), at(1)),
            reply(3, Some(1), at(2)),
            reply(4, Some(3), at(3)),
            reply(5, Some(77), at(4)), // orphan
            reply(6, None, at(5)),
        ];
        let tree = ReplyTree::build(&replies);
        let walked = tree.walk();
        assert_eq!(walked.len(), replies.len());
        let mut ids = walked.iter().map(|(r, _)| r.id).collect::<Vec<_>>();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), replies.len());
    }

    #[test]
    fn parent_of_depth_d_is_at_depth_d_minus_one() {
        let replies = vec![
            reply(1, None, at(0)),
            reply(2, Some(1), at(1)),
            reply(3, Some(2), at(2)),
            reply(4, Some(1), at(3)),
            reply(5, None, at(4)),
            reply(6, Some(5), at(5)),
        ];
        let tree = ReplyTree::build(&replies);
        let walked = tree.walk();
        for (i, (r, depth)) in walked.iter().enumerate() {
            let parent = match r.parent_id {
                Some(p) => p,
                None => {
                    assert_eq!(*depth, 0);
                    continue;
                }
            };
            let (_, parent_depth) = walked
                .iter()
                .take(i)
                .find(|(c, _)| c.id == parent)
                .expect("parent must come before its child in the walk");
            assert_eq!(*depth, parent_depth + 1);
        }
    }

    #[test]
    fn parent_cycle_terminates_and_loses_nothing() {
        // 2 and 3 point at each other; both parents exist so neither is
        // promoted at build time, yet the walk must still emit them
        let replies = vec![
            reply(1, None, at(0)),
            reply(2, Some(3), at(1)),
            reply(3, Some(2), at(2)),
        ];
        let tree = ReplyTree::build(&replies);
        let walked = walked_ids(&tree);
        assert_eq!(walked.len(), 3);
        assert_eq!(walked[0], (1, 0));
        // the cycle is broken at its chronologically-first member
        assert_eq!(walked[1], (2, 0));
        assert_eq!(walked[2], (3, 1));
    }

    #[test]
    fn empty_thread() {
        let tree = ReplyTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.walk().is_empty());
        assert!(tree.roots().is_empty());
    }
}
