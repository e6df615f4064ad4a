//! Post-processing passes over an edit script.
//!
//! None of these change what a script reconstructs: removed plus unchanged
//! text always yields the original, inserted plus unchanged the modified.
//! Work is done on `char` buffers so offsets never split a code point.

use super::types::{Segment, SegmentKind};
use SegmentKind::{Equal, Insert, Remove};

#[derive(Debug, Clone)]
struct Chunk {
    kind: SegmentKind,
    text: Vec<char>,
}

impl Chunk {
    fn new(kind: SegmentKind, text: Vec<char>) -> Self {
        Self { kind, text }
    }
}

fn to_chunks(segments: Vec<Segment>) -> Vec<Chunk> {
    segments
        .into_iter()
        .map(|s| Chunk::new(s.kind, s.text.chars().collect()))
        .collect()
}

/// Convert back, dropping empty runs and joining neighbours of the same kind
fn from_chunks(chunks: Vec<Chunk>) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::with_capacity(chunks.len());
    for chunk in chunks.into_iter().filter(|c| !c.text.is_empty()) {
        match segments.last_mut() {
            Some(last) if last.kind == chunk.kind => last.text.extend(chunk.text),
            _ => segments.push(Segment::new(chunk.kind, chunk.text.into_iter().collect::<String>())),
        }
    }
    segments
}

fn common_prefix(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[char], b: &[char]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Length of the longest suffix of `a` that is also a prefix of `b`
fn common_overlap(a: &[char], b: &[char]) -> usize {
    let max = a.len().min(b.len());
    (1..=max)
        .rev()
        .find(|&k| a[a.len() - k..] == b[..k])
        .unwrap_or(0)
}

/// Join adjacent runs, factor common prefixes and suffixes out of
/// remove/insert pairs and slide single edits across their equalities.
pub fn merge(segments: Vec<Segment>) -> Vec<Segment> {
    let mut chunks = to_chunks(segments);
    merge_chunks(&mut chunks);
    from_chunks(chunks)
}

/// Trade minimality for readability: fold short equalities sitting between
/// larger edits into those edits, align edit boundaries with word and line
/// breaks, and pull overlapping text out of remove/insert pairs.
pub fn semantic(segments: Vec<Segment>) -> Vec<Segment> {
    let mut chunks = to_chunks(segments);
    semantic_chunks(&mut chunks);
    from_chunks(chunks)
}

/// Only slide single edits sideways to the most natural boundary.
pub fn semantic_lossless(segments: Vec<Segment>) -> Vec<Segment> {
    let mut chunks = to_chunks(segments);
    semantic_lossless_chunks(&mut chunks);
    from_chunks(chunks)
}

/// Fold equalities shorter than `edit_cost` into surrounding edits when that
/// reduces the number of edit operations. `0` leaves the script untouched.
pub fn efficiency(segments: Vec<Segment>, edit_cost: u32) -> Vec<Segment> {
    if edit_cost == 0 {
        return segments;
    }
    let mut chunks = to_chunks(segments);
    efficiency_chunks(&mut chunks, edit_cost as usize);
    from_chunks(chunks)
}

fn merge_chunks(chunks: &mut Vec<Chunk>) {
    // Sentinel so the last run of edits gets flushed
    chunks.push(Chunk::new(Equal, Vec::new()));
    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete: Vec<char> = Vec::new();
    let mut text_insert: Vec<char> = Vec::new();

    while pointer < chunks.len() {
        match chunks[pointer].kind {
            Insert => {
                count_insert += 1;
                text_insert.extend_from_slice(&chunks[pointer].text);
                pointer += 1;
            }
            Remove => {
                count_delete += 1;
                text_delete.extend_from_slice(&chunks[pointer].text);
                pointer += 1;
            }
            Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let prefix = common_prefix(&text_insert, &text_delete);
                        if prefix != 0 {
                            let start = pointer - count_delete - count_insert;
                            if start > 0 && chunks[start - 1].kind == Equal {
                                chunks[start - 1]
                                    .text
                                    .extend_from_slice(&text_insert[..prefix]);
                            } else {
                                chunks.insert(0, Chunk::new(Equal, text_insert[..prefix].to_vec()));
                                pointer += 1;
                            }
                            text_insert.drain(..prefix);
                            text_delete.drain(..prefix);
                        }
                        let suffix = common_suffix(&text_insert, &text_delete);
                        if suffix != 0 {
                            let mut text = text_insert[text_insert.len() - suffix..].to_vec();
                            text.extend_from_slice(&chunks[pointer].text);
                            chunks[pointer].text = text;
                            text_insert.truncate(text_insert.len() - suffix);
                            text_delete.truncate(text_delete.len() - suffix);
                        }
                    }
                    pointer -= count_delete + count_insert;
                    chunks.drain(pointer..pointer + count_delete + count_insert);
                    if !text_delete.is_empty() {
                        chunks.insert(pointer, Chunk::new(Remove, std::mem::take(&mut text_delete)));
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        chunks.insert(pointer, Chunk::new(Insert, std::mem::take(&mut text_insert)));
                        pointer += 1;
                    }
                    pointer += 1;
                } else if pointer != 0 && chunks[pointer - 1].kind == Equal {
                    let text = std::mem::take(&mut chunks[pointer].text);
                    chunks[pointer - 1].text.extend(text);
                    chunks.remove(pointer);
                } else {
                    pointer += 1;
                }
                count_insert = 0;
                count_delete = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }
    if chunks.last().is_some_and(|c| c.text.is_empty()) {
        chunks.pop();
    }

    // Second pass: an edit surrounded by equalities can sometimes be shifted
    // sideways to swallow one of them, e.g. A<ins>BA</ins>C -> <ins>AB</ins>AC
    let mut changes = false;
    let mut pointer = 1;
    while pointer + 1 < chunks.len() {
        if chunks[pointer - 1].kind == Equal && chunks[pointer + 1].kind == Equal {
            let prev = chunks[pointer - 1].text.clone();
            let next = chunks[pointer + 1].text.clone();
            let edit = chunks[pointer].text.clone();
            if edit.ends_with(&prev) {
                let mut shifted = prev.clone();
                shifted.extend_from_slice(&edit[..edit.len() - prev.len()]);
                chunks[pointer].text = shifted;
                let mut following = prev;
                following.extend_from_slice(&next);
                chunks[pointer + 1].text = following;
                chunks.remove(pointer - 1);
                changes = true;
            } else if edit.starts_with(&next) {
                chunks[pointer - 1].text.extend_from_slice(&next);
                let mut shifted = edit[next.len()..].to_vec();
                shifted.extend_from_slice(&next);
                chunks[pointer].text = shifted;
                chunks.remove(pointer + 1);
                changes = true;
            }
        }
        pointer += 1;
    }
    if changes {
        merge_chunks(chunks);
    }
}

fn semantic_chunks(chunks: &mut Vec<Chunk>) {
    let mut changes = false;
    // Indices of equalities still eligible for folding
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<Vec<char>> = None;
    // Edit lengths before and after the last equality
    let (mut insertions_before, mut deletions_before) = (0usize, 0usize);
    let (mut insertions_after, mut deletions_after) = (0usize, 0usize);
    let mut pointer = 0;

    while pointer < chunks.len() {
        if chunks[pointer].kind == Equal {
            equalities.push(pointer);
            insertions_before = insertions_after;
            deletions_before = deletions_after;
            insertions_after = 0;
            deletions_after = 0;
            last_equality = Some(chunks[pointer].text.clone());
        } else {
            if chunks[pointer].kind == Insert {
                insertions_after += chunks[pointer].text.len();
            } else {
                deletions_after += chunks[pointer].text.len();
            }
            let fold = match (&last_equality, equalities.last()) {
                (Some(equality), Some(&at))
                    if !equality.is_empty()
                        && equality.len() <= insertions_before.max(deletions_before)
                        && equality.len() <= insertions_after.max(deletions_after) =>
                {
                    Some((at, equality.clone()))
                }
                _ => None,
            };
            if let Some((at, equality)) = fold {
                chunks.insert(at, Chunk::new(Remove, equality));
                chunks[at + 1].kind = Insert;
                // Drop the folded equality and re-evaluate the one before it
                equalities.pop();
                equalities.pop();
                insertions_before = 0;
                deletions_before = 0;
                insertions_after = 0;
                deletions_after = 0;
                last_equality = None;
                changes = true;
                pointer = equalities.last().map_or(0, |&p| p + 1);
                continue;
            }
        }
        pointer += 1;
    }

    if changes {
        merge_chunks(chunks);
    }
    semantic_lossless_chunks(chunks);

    // Pull overlaps out of remove/insert pairs:
    //   <del>abcxxx</del><ins>xxxdef</ins> -> <del>abc</del>xxx<ins>def</ins>
    //   <del>xxxabc</del><ins>defxxx</ins> -> <ins>def</ins>xxx<del>abc</del>
    let mut pointer = 1;
    while pointer < chunks.len() {
        if chunks[pointer - 1].kind == Remove && chunks[pointer].kind == Insert {
            let deletion = chunks[pointer - 1].text.clone();
            let insertion = chunks[pointer].text.clone();
            let forward = common_overlap(&deletion, &insertion);
            let backward = common_overlap(&insertion, &deletion);
            if forward >= backward {
                if forward > 0 && (forward * 2 >= deletion.len() || forward * 2 >= insertion.len())
                {
                    chunks.insert(pointer, Chunk::new(Equal, insertion[..forward].to_vec()));
                    chunks[pointer - 1].text = deletion[..deletion.len() - forward].to_vec();
                    chunks[pointer + 1].text = insertion[forward..].to_vec();
                    pointer += 1;
                }
            } else if backward * 2 >= deletion.len() || backward * 2 >= insertion.len() {
                chunks.insert(pointer, Chunk::new(Equal, deletion[..backward].to_vec()));
                chunks[pointer - 1] =
                    Chunk::new(Insert, insertion[..insertion.len() - backward].to_vec());
                chunks[pointer + 1] = Chunk::new(Remove, deletion[backward..].to_vec());
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

fn semantic_lossless_chunks(chunks: &mut Vec<Chunk>) {
    let mut pointer = 1;
    while pointer + 1 < chunks.len() {
        if chunks[pointer - 1].kind == Equal && chunks[pointer + 1].kind == Equal {
            let mut equality1 = chunks[pointer - 1].text.clone();
            let mut edit = chunks[pointer].text.clone();
            let mut equality2 = chunks[pointer + 1].text.clone();

            // Shift the edit as far left as possible first
            let offset = common_suffix(&equality1, &edit);
            if offset > 0 {
                let common = edit[edit.len() - offset..].to_vec();
                equality1.truncate(equality1.len() - offset);
                let mut shifted = common.clone();
                shifted.extend_from_slice(&edit[..edit.len() - offset]);
                edit = shifted;
                let mut following = common;
                following.extend_from_slice(&equality2);
                equality2 = following;
            }

            // Then step right one char at a time, keeping the best placement
            let mut best = (equality1.clone(), edit.clone(), equality2.clone());
            let mut best_score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
            while !edit.is_empty() && !equality2.is_empty() && edit[0] == equality2[0] {
                let moved = equality2.remove(0);
                equality1.push(edit.remove(0));
                edit.push(moved);
                let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
                // >= favours trailing over leading whitespace
                if score >= best_score {
                    best_score = score;
                    best = (equality1.clone(), edit.clone(), equality2.clone());
                }
            }

            if chunks[pointer - 1].text != best.0 {
                let (best_equality1, best_edit, best_equality2) = best;
                if best_equality1.is_empty() {
                    chunks.remove(pointer - 1);
                    pointer -= 1;
                } else {
                    chunks[pointer - 1].text = best_equality1;
                }
                chunks[pointer].text = best_edit;
                if best_equality2.is_empty() {
                    chunks.remove(pointer + 1);
                    pointer = pointer.saturating_sub(1);
                } else {
                    chunks[pointer + 1].text = best_equality2;
                }
            }
        }
        pointer += 1;
    }
}

/// Score how natural the boundary between `one` and `two` is, 6 being best
fn boundary_score(one: &[char], two: &[char]) -> u8 {
    let (Some(&char1), Some(&char2)) = (one.last(), two.first()) else {
        // Edges are the best possible boundaries
        return 6;
    };

    let non_alphanumeric1 = !char1.is_ascii_alphanumeric();
    let non_alphanumeric2 = !char2.is_ascii_alphanumeric();
    let whitespace1 = non_alphanumeric1 && char1.is_whitespace();
    let whitespace2 = non_alphanumeric2 && char2.is_whitespace();
    let line_break1 = whitespace1 && matches!(char1, '\r' | '\n');
    let line_break2 = whitespace2 && matches!(char2, '\r' | '\n');
    let blank_line1 = line_break1 && ends_with_blank_line(one);
    let blank_line2 = line_break2 && starts_with_blank_line(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alphanumeric1 && !whitespace1 && whitespace2 {
        // End of sentence
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alphanumeric1 || non_alphanumeric2 {
        1
    } else {
        0
    }
}

fn strip_newline(text: &[char]) -> Option<&[char]> {
    match text {
        ['\r', '\n', rest @ ..] | ['\n', rest @ ..] => Some(rest),
        _ => None,
    }
}

fn starts_with_blank_line(text: &[char]) -> bool {
    strip_newline(text).and_then(strip_newline).is_some()
}

fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

fn efficiency_chunks(chunks: &mut Vec<Chunk>, edit_cost: usize) {
    let mut changes = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<Vec<char>> = None;
    // Whether there is an insertion/deletion before and after the last equality
    let (mut pre_ins, mut pre_del) = (false, false);
    let (mut post_ins, mut post_del) = (false, false);
    let mut pointer = 0;

    while pointer < chunks.len() {
        if chunks[pointer].kind == Equal {
            if chunks[pointer].text.len() < edit_cost && (post_ins || post_del) {
                equalities.push(pointer);
                pre_ins = post_ins;
                pre_del = post_del;
                last_equality = Some(chunks[pointer].text.clone());
            } else {
                equalities.clear();
                last_equality = None;
            }
            post_ins = false;
            post_del = false;
        } else {
            if chunks[pointer].kind == Remove {
                post_del = true;
            } else {
                post_ins = true;
            }
            let edits_around = [pre_ins, pre_del, post_ins, post_del]
                .iter()
                .filter(|&&flag| flag)
                .count();
            // Fold <ins>A</ins><del>B</del>X<ins>C</ins><del>D</del>
            // and <ins>A</ins>X<ins>C</ins><del>D</del> style patterns
            let fold = match (&last_equality, equalities.last()) {
                (Some(equality), Some(&at))
                    if !equality.is_empty()
                        && (edits_around == 4
                            || (equality.len() * 2 < edit_cost && edits_around == 3)) =>
                {
                    Some((at, equality.clone()))
                }
                _ => None,
            };
            if let Some((at, equality)) = fold {
                chunks.insert(at, Chunk::new(Remove, equality));
                chunks[at + 1].kind = Insert;
                equalities.pop();
                last_equality = None;
                changes = true;
                if pre_ins && pre_del {
                    // No changes made which could affect previous entry, keep going
                    post_ins = true;
                    post_del = true;
                    equalities.clear();
                } else {
                    equalities.pop();
                    post_ins = false;
                    post_del = false;
                    pointer = equalities.last().map_or(0, |&p| p + 1);
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changes {
        merge_chunks(chunks);
    }
}
