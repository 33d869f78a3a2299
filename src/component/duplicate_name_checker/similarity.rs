//! Ratcliff/Obershelp 相似度
//!
//! 反覆找出最長共同區塊，再對左右剩餘部分遞迴，比例為 2 * 相符長度 / 兩字串總長。

use std::collections::HashMap;

/// 兩字串的相似度，範圍 `[0, 1]`；兩個空字串視為完全相同
#[must_use]
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matched_length(&a, &b);
    (2 * matched) as f64 / total as f64
}

fn matched_length(a: &[char], b: &[char]) -> usize {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b_positions.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = queue.pop() {
        let (i, j, size) = longest_match(a, &b_positions, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }

        matched += size;
        if a_lo < i && b_lo < j {
            queue.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            queue.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// 在 `a[a_lo..a_hi]` 與 `b[b_lo..b_hi]` 中找最長共同區塊
///
/// 同長度時取在 `a` 中最早出現者，再取在 `b` 中最早出現者。
fn longest_match(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    // 以 b 的結束位置記錄目前延伸到的長度
    let mut run_lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next_run_lengths = HashMap::new();

        if let Some(positions) = b_positions.get(ch) {
            for &j in positions {
                if j < b_lo {
                    continue;
                }
                if j >= b_hi {
                    break;
                }

                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run_lengths.insert(j, k);

                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }

        run_lengths = next_run_lengths;
    }

    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_ratio(a: &str, b: &str, expected: f64) {
        let ratio = similarity_ratio(a, b);
        assert!(
            (ratio - expected).abs() < 1e-9,
            "ratio({a:?}, {b:?}) = {ratio}, expected {expected}"
        );
    }

    #[test]
    fn test_identical_strings() {
        assert_ratio("show", "show", 1.0);
    }

    #[test]
    fn test_empty_strings() {
        assert_ratio("", "", 1.0);
        assert_ratio("abc", "", 0.0);
    }

    #[test]
    fn test_disjoint_strings() {
        assert_ratio("abc", "xyz", 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // 相符 3，總長 7
        assert_ratio("foo", "foo_", 6.0 / 7.0);
        assert_ratio("abcd", "bcde", 0.75);
    }

    #[test]
    fn test_recurses_into_both_sides() {
        // 最長區塊 "abc"，右側剩餘部分再配到 "e"
        assert_ratio("abcxe", "abcye", 0.8);
        assert_ratio("qabxcd", "abycdf", 2.0 * 4.0 / 12.0);
    }

    #[test]
    fn test_not_symmetric_blocks_but_bounded() {
        let r1 = similarity_ratio("tide", "diet");
        let r2 = similarity_ratio("diet", "tide");
        assert!((0.0..=1.0).contains(&r1));
        assert!((0.0..=1.0).contains(&r2));
    }

    #[test]
    fn test_cjk_characters_counted_per_char() {
        assert_ratio("作品名", "作品", 0.8);
    }
}
