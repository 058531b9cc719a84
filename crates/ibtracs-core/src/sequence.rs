use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::table::{ISO_TIME, SID, STORM_ID};

/// How distinct storm identifiers are mapped onto `1..=n`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceOrder {
    /// Ascending lexical order of SID. IBTrACS SIDs lead with year and day of
    /// year, so this is also genesis order.
    #[default]
    SortedId,
    /// Order of first appearance in the table.
    FirstSeen,
}

/// Appends a dense 1-based `storm_id` column, one number per distinct SID.
pub fn assign_storm_ids(df: &DataFrame, order: SequenceOrder) -> PolarsResult<DataFrame> {
    let sids = df.column(SID)?.str()?;
    let keys: Vec<&str> = sids.into_iter().map(|sid| sid.unwrap_or_default()).collect();

    let numbering: HashMap<&str, u32> = match order {
        SequenceOrder::SortedId => {
            let distinct: BTreeSet<&str> = keys.iter().copied().collect();
            distinct
                .into_iter()
                .enumerate()
                .map(|(idx, sid)| (sid, idx as u32 + 1))
                .collect()
        }
        SequenceOrder::FirstSeen => {
            let mut seen = HashMap::new();
            for sid in &keys {
                let next = seen.len() as u32 + 1;
                seen.entry(*sid).or_insert(next);
            }
            seen
        }
    };

    let ids: Vec<u32> = keys.iter().map(|sid| numbering[sid]).collect();

    let mut output = df.clone();
    let mut columns = [Series::new(STORM_ID.into(), ids).into()];
    output.hstack_mut(columns.as_mut_slice())?;
    Ok(output)
}

/// Stable sort by (`storm_id`, `ISO_TIME`), both ascending.
pub fn sort_by_storm_and_time(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.sort(
        [STORM_ID, ISO_TIME],
        SortMultipleOptions::default().with_maintain_order(true),
    )
}

/// Number of distinct storm numbers in a sequenced frame.
pub fn storm_count(df: &DataFrame) -> PolarsResult<usize> {
    let ids = df.column(STORM_ID)?.u32()?;
    let distinct: BTreeSet<u32> = ids.into_iter().flatten().collect();
    Ok(distinct.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_track_frame;
    use crate::table::test_support::{at, obs};

    fn ids(df: &DataFrame) -> Vec<u32> {
        df.column(STORM_ID)
            .unwrap()
            .u32()
            .unwrap()
            .into_iter()
            .map(|id| id.unwrap())
            .collect()
    }

    fn sids(df: &DataFrame) -> Vec<String> {
        df.column(SID)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|sid| sid.unwrap().to_string())
            .collect()
    }

    #[test]
    fn sorted_id_numbers_by_identifier() {
        let df = build_track_frame(&[
            obs("2020240N20300", at(1, 0)),
            obs("2020233N14313", at(1, 0)),
            obs("2020240N20300", at(1, 6)),
            obs("2020236N13300", at(1, 0)),
        ])
        .unwrap();

        let sequenced = assign_storm_ids(&df, SequenceOrder::SortedId).unwrap();
        assert_eq!(ids(&sequenced), [3, 1, 3, 2]);
        assert_eq!(storm_count(&sequenced).unwrap(), 3);
    }

    #[test]
    fn first_seen_numbers_by_appearance() {
        let df = build_track_frame(&[
            obs("Z", at(1, 0)),
            obs("A", at(1, 0)),
            obs("Z", at(1, 6)),
            obs("M", at(1, 0)),
        ])
        .unwrap();

        let sequenced = assign_storm_ids(&df, SequenceOrder::FirstSeen).unwrap();
        assert_eq!(ids(&sequenced), [1, 2, 1, 3]);
    }

    #[test]
    fn numbering_is_dense_from_one() {
        let observations: Vec<_> = ["D", "B", "B", "C", "A", "C"]
            .iter()
            .map(|sid| obs(sid, at(1, 0)))
            .collect();
        let df = build_track_frame(&observations).unwrap();

        for order in [SequenceOrder::SortedId, SequenceOrder::FirstSeen] {
            let sequenced = assign_storm_ids(&df, order).unwrap();
            let distinct: BTreeSet<u32> = ids(&sequenced).into_iter().collect();
            assert_eq!(distinct.into_iter().collect::<Vec<_>>(), [1, 2, 3, 4]);
        }
    }

    #[test]
    fn sort_groups_storms_and_orders_time() {
        let df = build_track_frame(&[
            obs("B", at(2, 6)),
            obs("A", at(1, 12)),
            obs("B", at(2, 0)),
            obs("A", at(1, 0)),
        ])
        .unwrap();
        let sequenced = assign_storm_ids(&df, SequenceOrder::SortedId).unwrap();
        let sorted = sort_by_storm_and_time(&sequenced).unwrap();

        assert_eq!(ids(&sorted), [1, 1, 2, 2]);
        assert_eq!(sids(&sorted), ["A", "A", "B", "B"]);
        let times = sorted.column(ISO_TIME).unwrap().datetime().unwrap();
        let micros: Vec<i64> = (0..sorted.height()).map(|i| times.get(i).unwrap()).collect();
        assert!(micros[0] < micros[1]);
        assert!(micros[2] < micros[3]);
    }

    #[test]
    fn sort_keeps_duplicate_timestamps_in_input_order() {
        let mut first = obs("A", at(1, 0));
        first.wind = "first".to_string();
        let mut second = obs("A", at(1, 0));
        second.wind = "second".to_string();

        let df = build_track_frame(&[first, second]).unwrap();
        let sequenced = assign_storm_ids(&df, SequenceOrder::SortedId).unwrap();
        let sorted = sort_by_storm_and_time(&sequenced).unwrap();
        let wind: Vec<&str> = sorted
            .column(crate::table::WIND)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(wind, ["first", "second"]);
    }

    #[test]
    fn empty_frame_gets_empty_storm_column() {
        let df = build_track_frame(&[]).unwrap();
        let sequenced = assign_storm_ids(&df, SequenceOrder::SortedId).unwrap();
        assert_eq!(sequenced.width(), 8);
        assert_eq!(storm_count(&sequenced).unwrap(), 0);
    }
}
