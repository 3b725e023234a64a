/// Calendar date and time split out of an epoch timestamp. `mon` and
/// `mday` are 0-based; rendering adds 1 to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datetime {
    pub year: i64,
    pub mon: u32,
    pub mday: u32,
    pub hour: u32,
    pub min: u32,
    pub sec: u32,
}

const DAYS_PER_400Y: i64 = 146_097;
const DAYS_PER_100Y: i64 = 36_524;
const DAYS_PER_4Y: i64 = 1_461;
/// Days from 0001-01-01 (proleptic Gregorian) to 1970-01-01.
const DAYS_TO_UNIX_EPOCH: i64 = 719_162;

const MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

impl Datetime {
    /// Converts seconds since the Unix epoch into calendar fields using
    /// pure integer arithmetic: divmod by 60/60/24 for the time of day,
    /// 400/100/4/1-year cycle corrections anchored at 0001-01-01 for the
    /// year, then a month-length table walk with a February leap
    /// adjustment. Deterministic for any non-negative input; inputs before
    /// the epoch are out of scope.
    ///
    /// Stateless, so it is safe from any thread.
    pub fn from_epoch_secs(secs: i64) -> Self {
        let sec = (secs % 60) as u32;
        let mut q = secs / 60;
        let min = (q % 60) as u32;
        q /= 60;
        let hour = (q % 24) as u32;
        q /= 24;

        let mut days = q + DAYS_TO_UNIX_EPOCH;
        let c400 = days / DAYS_PER_400Y;
        days %= DAYS_PER_400Y;
        // The last sub-period of each cycle is one day longer, so the
        // division overshoots only on that final day; clamp it back.
        let mut c100 = days / DAYS_PER_100Y;
        if c100 == 4 {
            c100 = 3;
        }
        days -= c100 * DAYS_PER_100Y;
        let c4 = days / DAYS_PER_4Y;
        days %= DAYS_PER_4Y;
        let mut c1 = days / 365;
        if c1 == 4 {
            c1 = 3;
        }
        days -= c1 * 365;

        let year = 400 * c400 + 100 * c100 + 4 * c4 + c1 + 1;
        let leap = is_leap_year(year);

        let mut mon = 0;
        loop {
            let dom = MONTH_DAYS[mon] + if mon == 1 && leap { 1 } else { 0 };
            if days < dom {
                break;
            }
            days -= dom;
            mon += 1;
        }

        Self {
            year,
            mon: mon as u32,
            mday: days as u32,
            hour,
            min,
            sec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Datetime;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_unix_epoch() {
        let dt = Datetime::from_epoch_secs(0);
        assert_eq!(
            dt,
            Datetime {
                year: 1970,
                mon: 0,
                mday: 0,
                hour: 0,
                min: 0,
                sec: 0
            }
        );
    }

    #[test]
    fn test_leap_day_2000() {
        // 2000-02-29T00:00:00
        let dt = Datetime::from_epoch_secs(951_782_400);
        assert_eq!(dt.year, 2000);
        assert_eq!(dt.mon, 1);
        assert_eq!(dt.mday, 28);
    }

    #[test]
    fn test_known_timestamp() {
        // 2024-01-02T03:04:05
        let dt = Datetime::from_epoch_secs(1_704_164_645);
        assert_eq!(dt.year, 2024);
        assert_eq!(dt.mon, 0);
        assert_eq!(dt.mday, 1);
        assert_eq!(dt.hour, 3);
        assert_eq!(dt.min, 4);
        assert_eq!(dt.sec, 5);
    }

    #[test]
    fn test_last_day_of_quad_cycle() {
        // 1971-12-31T23:59:59, the last day of a 4-year leap cycle.
        let dt = Datetime::from_epoch_secs(63_071_999);
        assert_eq!(dt.year, 1971);
        assert_eq!(dt.mon, 11);
        assert_eq!(dt.mday, 30);
        assert_eq!(dt.hour, 23);
        assert_eq!(dt.min, 59);
        assert_eq!(dt.sec, 59);
    }

    #[test]
    fn test_matches_chrono() {
        let samples: &[i64] = &[
            0,
            86_399,
            951_782_399,     // 2000-02-28T23:59:59
            951_782_400,     // 2000-02-29T00:00:00
            951_868_800,     // 2000-03-01T00:00:00
            1_000_000_000,
            1_704_164_645,
            2_147_483_647,
            4_107_542_399,   // 2100-02-28T23:59:59, non-leap century
            4_107_542_400,   // 2100-03-01T00:00:00
            13_574_563_199,  // 2400-02-29 region, leap century
        ];
        for &secs in samples {
            let dt = Datetime::from_epoch_secs(secs);
            let expected = chrono::DateTime::from_timestamp(secs, 0).unwrap();
            assert_eq!(dt.year, expected.year() as i64, "year for {secs}");
            assert_eq!(dt.mon + 1, expected.month(), "month for {secs}");
            assert_eq!(dt.mday + 1, expected.day(), "day for {secs}");
            assert_eq!(dt.hour, expected.hour(), "hour for {secs}");
            assert_eq!(dt.min, expected.minute(), "minute for {secs}");
            assert_eq!(dt.sec, expected.second(), "second for {secs}");
        }
    }
}
