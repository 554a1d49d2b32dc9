use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use super::totals::DirectoryTotals;

/// Fold every directory's total into its ancestors, up to and including `root`.
///
/// Input values are direct subtotals; in the result each directory's value
/// includes all of its descendants. Directories are processed deepest first
/// (by component count), so a directory is complete before it is added to its
/// parent. Ancestry is tested per component: with root `/data/foo`, nothing is
/// ever folded into `/data` or `/data/foobar`.
pub fn aggregate_totals(direct: DirectoryTotals, root: &Path) -> DirectoryTotals {
    let missing = missing_ancestors(&direct, root);

    // Keys move into `paths` once; everything below works on indices.
    let (paths, mut sizes): (Vec<PathBuf>, Vec<u64>) = direct
        .into_iter()
        .chain(missing.into_iter().map(|dir| (dir, 0)))
        .unzip();

    let index: HashMap<&Path, usize> = paths
        .iter()
        .enumerate()
        .map(|(i, dir)| (dir.as_path(), i))
        .collect();

    let mut order: Vec<(usize, usize)> = paths
        .iter()
        .enumerate()
        .map(|(i, dir)| (dir.components().count(), i))
        .collect();
    // Stable sort keeps every directory of one depth ahead of all shallower ones.
    order.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, i) in order {
        let dir = &paths[i];
        if dir == root {
            continue;
        }

        let Some(parent) = dir.parent().filter(|parent| parent.starts_with(root)) else {
            continue;
        };
        if let Some(&p) = index.get(parent) {
            sizes[p] = sizes[p].saturating_add(sizes[i]);
        }
    }
    drop(index);

    paths.into_iter().zip(sizes).collect()
}

/// Intermediate directories under `root` that have no entry yet.
///
/// Without them a child's bytes would stop one level short of the root. Each
/// ancestor walk stops at the first recorded ancestor, which covers the rest.
fn missing_ancestors(totals: &DirectoryTotals, root: &Path) -> HashSet<PathBuf> {
    totals
        .dirs()
        .filter(|dir| dir.starts_with(root))
        .flat_map(move |dir| {
            dir.ancestors()
                .skip(1)
                .take_while(move |ancestor| {
                    ancestor.starts_with(root) && !totals.contains(ancestor)
                })
        })
        .map(Path::to_path_buf)
        .collect()
}
