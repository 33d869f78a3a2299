//! 重複群組建立
//!
//! 只在同一資料夾內比對。每個尚未被認領的項目開一個群組作為種子，
//! 依序把與種子相似且不屬於同系列不同集數的項目加入。
//! 群組成員只保證與種子相似，成員彼此之間不保證。

use super::name_normalizer::normalize_name;
use super::similarity::similarity_ratio;
use super::variant_classifier::{PatternMatches, VariantCatalog};
use crate::tools::{Entry, ReportRow};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

/// 同一資料夾內被判定為重複的一組項目，第一個成員為種子
///
/// 至少有兩個成員。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    entries: Vec<Entry>,
}

impl DuplicateGroup {
    /// 成員少於兩個時回傳 `None`
    #[must_use]
    pub fn new(entries: Vec<Entry>) -> Option<Self> {
        (entries.len() >= 2).then_some(Self { entries })
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn seed(&self) -> &Entry {
        &self.entries[0]
    }

    /// 種子名稱的正規化結果，作為顯示用的相似核心
    #[must_use]
    pub fn core_key(&self) -> String {
        normalize_name(&self.seed().name)
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        self.seed().parent_folder()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 建立重複群組
///
/// `depth_filter` 有值時只處理該層級的項目。`threshold` 超出 `[0, 1]` 會被夾回範圍內。
#[must_use]
pub fn group_duplicates(
    entries: &[Entry],
    threshold: f64,
    user_keywords: &[String],
    depth_filter: Option<usize>,
) -> Vec<DuplicateGroup> {
    let threshold = clamp_threshold(threshold);
    let catalog = VariantCatalog::new(user_keywords);

    let candidates: Vec<&Entry> = entries
        .iter()
        .filter(|entry| depth_filter.is_none_or(|depth| entry.depth == depth))
        .collect();

    let folders = partition_by_folder(&candidates);
    info!(
        "比對 {} 個項目，分布於 {} 個資料夾（門檻 {threshold:.2}，樣式 {} 個）",
        candidates.len(),
        folders.len(),
        catalog.len()
    );

    let groups: Vec<DuplicateGroup> = folders
        .iter()
        .flat_map(|folder_entries| group_folder(folder_entries, threshold, &catalog))
        .collect();

    info!("找到 {} 組重複", groups.len());
    groups
}

/// 轉成報告列，群組編號從 1 開始
#[must_use]
pub fn report_rows(groups: &[DuplicateGroup]) -> Vec<ReportRow> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(idx, group)| {
            group.entries().iter().map(move |entry| ReportRow {
                group_index: idx + 1,
                name: entry.name.clone(),
                path: entry.path.to_string_lossy().into_owned(),
            })
        })
        .collect()
}

fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        warn!("相似度門檻無效，改用 1.0");
        return 1.0;
    }
    if !(0.0..=1.0).contains(&threshold) {
        warn!("相似度門檻 {threshold} 超出範圍，已夾至 [0, 1]");
    }
    threshold.clamp(0.0, 1.0)
}

/// 依所在資料夾分組，保留資料夾首次出現的順序與各項目的遍歷順序
fn partition_by_folder<'a>(entries: &[&'a Entry]) -> Vec<Vec<&'a Entry>> {
    let mut folder_index: HashMap<&Path, usize> = HashMap::new();
    let mut folders: Vec<Vec<&Entry>> = Vec::new();

    for &entry in entries {
        let idx = *folder_index.entry(entry.parent_folder()).or_insert_with(|| {
            folders.push(Vec::new());
            folders.len() - 1
        });
        folders[idx].push(entry);
    }

    folders
}

fn group_folder(
    entries: &[&Entry],
    threshold: f64,
    catalog: &VariantCatalog,
) -> Vec<DuplicateGroup> {
    let keys: Vec<String> = entries.iter().map(|e| normalize_name(&e.name)).collect();
    let matches: Vec<PatternMatches> = entries.iter().map(|e| catalog.matches(&e.name)).collect();
    let mut claimed = vec![false; entries.len()];
    let mut groups = Vec::new();

    for seed_idx in 0..entries.len() {
        if claimed[seed_idx] {
            continue;
        }

        let seed = entries[seed_idx];
        let mut members = vec![seed_idx];

        for candidate_idx in (seed_idx + 1)..entries.len() {
            if claimed[candidate_idx] {
                continue;
            }

            let candidate = entries[candidate_idx];
            if matches[seed_idx].overlaps(&matches[candidate_idx]) {
                debug!("系列不同集數，略過: {} / {}", seed.name, candidate.name);
                continue;
            }

            let ratio = similarity_ratio(&keys[seed_idx], &keys[candidate_idx]);
            if ratio >= threshold {
                debug!("相似 {ratio:.3}: {} / {}", seed.name, candidate.name);
                members.push(candidate_idx);
                claimed[candidate_idx] = true;
            }
        }

        let members: Vec<Entry> = members.into_iter().map(|idx| entries[idx].clone()).collect();
        if let Some(group) = DuplicateGroup::new(members) {
            claimed[seed_idx] = true;
            groups.push(group);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    fn entry(folder: &str, name: &str, depth: usize) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from(folder).join(name),
            depth,
            is_dir: false,
        }
    }

    fn names(group: &DuplicateGroup) -> Vec<&str> {
        group.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_volume_variants_not_grouped() {
        let entries = vec![
            entry("/v", "Show Vol.1.mp4", 0),
            entry("/v", "Show Vol.2.mp4", 0),
        ];
        assert!(group_duplicates(&entries, 0.8, &[], None).is_empty());
    }

    #[test]
    fn test_cosmetic_variants_grouped() {
        let entries = vec![entry("/v", "Show (DL版).mp4", 0), entry("/v", "Show.mp4", 0)];
        let groups = group_duplicates(&entries, 0.8, &[], None);

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["Show (DL版).mp4", "Show.mp4"]);
        assert_eq!(groups[0].core_key(), "show");
        assert_eq!(groups[0].folder(), Path::new("/v"));
    }

    #[test]
    fn test_depth_filter_excludes_other_depths() {
        let entries = vec![
            entry("/root/a/b", "Foo", 2),
            entry("/root/a/b", "foo_", 2),
            entry("/root/a/b", "Foo", 0),
        ];
        let groups = group_duplicates(&entries, 0.8, &[], Some(2));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert!(groups[0].entries().iter().all(|e| e.depth == 2));
    }

    #[test]
    fn test_different_folders_never_grouped() {
        let entries = vec![entry("/a", "Show.mp4", 0), entry("/b", "Show.mp4", 0)];
        assert!(group_duplicates(&entries, 0.5, &[], None).is_empty());
    }

    #[test]
    fn test_user_keyword_vetoes_pair() {
        let entries = vec![
            entry("/v", "作品 特典.mp4", 0),
            entry("/v", "作品【特典】.mp4", 0),
        ];
        assert_eq!(group_duplicates(&entries, 0.5, &[], None).len(), 1);

        let keywords = vec!["特典".to_string()];
        assert!(group_duplicates(&entries, 0.5, &keywords, None).is_empty());
    }

    #[test]
    fn test_seed_based_grouping_is_not_transitive() {
        // abce 與 abef 相似度 0.75，但種子 abcd 與 abef 只有 0.5
        let entries = vec![
            entry("/v", "abcd", 0),
            entry("/v", "abce", 0),
            entry("/v", "abef", 0),
        ];
        let groups = group_duplicates(&entries, 0.7, &[], None);

        assert_eq!(groups.len(), 1);
        assert_eq!(names(&groups[0]), vec!["abcd", "abce"]);
    }

    #[test]
    fn test_first_group_claims_members() {
        let entries = vec![
            entry("/v", "title.mp4", 0),
            entry("/v", "title.mkv", 0),
            entry("/v", "Title (1).avi", 0),
        ];
        let groups = group_duplicates(&entries, 0.9, &[], None);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_groups_follow_folder_discovery_order() {
        let entries = vec![
            entry("/b", "x.mp4", 0),
            entry("/a", "y.mp4", 0),
            entry("/b", "x (1).mp4", 0),
            entry("/a", "y [2].mp4", 0),
        ];
        let groups = group_duplicates(&entries, 0.9, &[], None);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].folder(), Path::new("/b"));
        assert_eq!(groups[1].folder(), Path::new("/a"));
    }

    #[test]
    fn test_group_invariants_hold() {
        let entries = vec![
            entry("/v", "Show.mp4", 0),
            entry("/v", "Show (DL版).mp4", 0),
            entry("/v", "Show English.mp4", 0),
            entry("/v", "Other.mp4", 0),
            entry("/v", "Othr.mp4", 0),
            entry("/w", "Show.mp4", 1),
        ];
        let threshold = 0.8;
        let groups = group_duplicates(&entries, threshold, &[], None);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(group.len() >= 2);
            let seed_key = group.core_key();
            for member in &group.entries()[1..] {
                assert!(similarity_ratio(&seed_key, &normalize_name(&member.name)) >= threshold);
                assert_eq!(member.parent_folder(), group.folder());
            }
            for member in group.entries() {
                assert!(seen.insert(member.path.clone()), "重複出現: {:?}", member.path);
            }
        }
    }

    #[test]
    fn test_threshold_is_clamped() {
        let entries = vec![entry("/v", "abc", 0), entry("/v", "xyz", 0)];
        // 負數會被夾成 0，任何組合都相似
        assert_eq!(group_duplicates(&entries, -1.0, &[], None).len(), 1);
        // 大於 1 夾成 1，只有完全相同才算
        assert!(group_duplicates(&entries, 2.0, &[], None).is_empty());
    }

    #[test]
    fn test_empty_normalized_keys_group_together() {
        let entries = vec![entry("/v", "(a).mp4", 0), entry("/v", "[b].mkv", 0)];
        assert_eq!(group_duplicates(&entries, 1.0, &[], None).len(), 1);
    }

    #[test]
    fn test_group_requires_two_members() {
        assert!(DuplicateGroup::new(Vec::new()).is_none());
        assert!(DuplicateGroup::new(vec![entry("/v", "a.mp4", 0)]).is_none());

        let group =
            DuplicateGroup::new(vec![entry("/v", "a.mp4", 0), entry("/v", "a (1).mp4", 0)])
                .unwrap();
        assert_eq!(group.seed().name, "a.mp4");
        assert_eq!(group.core_key(), "a");
        assert_eq!(group.folder(), Path::new("/v"));
    }

    #[test]
    fn test_report_rows_numbered_from_one() {
        let entries = vec![
            entry("/v", "Show.mp4", 0),
            entry("/v", "Show (DL版).mp4", 0),
            entry("/w", "a.mp4", 0),
            entry("/w", "a (copy).mp4", 0),
        ];
        let groups = group_duplicates(&entries, 0.8, &[], None);
        let rows = report_rows(&groups);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].group_index, 1);
        assert_eq!(rows[1].name, "Show (DL版).mp4");
        assert_eq!(rows[3].group_index, 2);
        assert_eq!(rows[3].path, PathBuf::from("/w/a (copy).mp4").to_string_lossy());
    }
}
