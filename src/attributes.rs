// 🐉 Derived Attributes - gender, zodiac, constellation, age
// Pure functions of substrings of the ID number. Nothing is cached.

use serde::Serialize;

// ============================================================================
// GENDER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// Decode from the gender digit (position 16 of the full number).
    ///
    /// Odd is male, even is female, anything that is not a digit is unknown.
    pub fn from_digit(c: char) -> Self {
        match c.to_digit(10) {
            Some(d) if d % 2 == 1 => Gender::Male,
            Some(_) => Gender::Female,
            None => Gender::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "男",
            Gender::Female => "女",
            Gender::Unknown => "未知",
        }
    }
}

// ============================================================================
// ZODIAC
// ============================================================================

/// The twelve animals of the Chinese zodiac
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

/// Indexed by `year % 12`: year 0 (and 2016, 2028, ...) is a Monkey year
const ZODIAC_CYCLE: [Zodiac; 12] = [
    Zodiac::Monkey,
    Zodiac::Rooster,
    Zodiac::Dog,
    Zodiac::Pig,
    Zodiac::Rat,
    Zodiac::Ox,
    Zodiac::Tiger,
    Zodiac::Rabbit,
    Zodiac::Dragon,
    Zodiac::Snake,
    Zodiac::Horse,
    Zodiac::Goat,
];

impl Zodiac {
    /// Animal for a Gregorian year (no lunar new year adjustment)
    pub fn from_year(year: i32) -> Self {
        ZODIAC_CYCLE[year.rem_euclid(12) as usize]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zodiac::Rat => "鼠",
            Zodiac::Ox => "牛",
            Zodiac::Tiger => "虎",
            Zodiac::Rabbit => "兔",
            Zodiac::Dragon => "龙",
            Zodiac::Snake => "蛇",
            Zodiac::Horse => "马",
            Zodiac::Goat => "羊",
            Zodiac::Monkey => "猴",
            Zodiac::Rooster => "鸡",
            Zodiac::Dog => "狗",
            Zodiac::Pig => "猪",
        }
    }
}

// ============================================================================
// CONSTELLATION
// ============================================================================

/// Western sun sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Constellation {
    Aquarius,
    Pisces,
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
}

/// (sign, start month, start day); each sign runs until the next sign's start
const CONSTELLATION_STARTS: [(Constellation, u32, u32); 11] = [
    (Constellation::Aquarius, 1, 20),
    (Constellation::Pisces, 2, 19),
    (Constellation::Aries, 3, 21),
    (Constellation::Taurus, 4, 20),
    (Constellation::Gemini, 5, 21),
    (Constellation::Cancer, 6, 22),
    (Constellation::Leo, 7, 23),
    (Constellation::Virgo, 8, 23),
    (Constellation::Libra, 9, 23),
    (Constellation::Scorpio, 10, 24),
    (Constellation::Sagittarius, 11, 23),
];

impl Constellation {
    /// Sign for a month/day pair.
    ///
    /// Capricorn covers 12/22 through 1/19 and is also the answer for
    /// anything before the first cusp or after the last.
    pub fn from_month_day(month: u32, day: u32) -> Self {
        let key = (month, day);
        if key >= (12, 22) {
            return Constellation::Capricorn;
        }

        CONSTELLATION_STARTS
            .iter()
            .rev()
            .find(|(_, m, d)| key >= (*m, *d))
            .map(|(sign, _, _)| *sign)
            .unwrap_or(Constellation::Capricorn)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Constellation::Aquarius => "水瓶座",
            Constellation::Pisces => "双鱼座",
            Constellation::Aries => "白羊座",
            Constellation::Taurus => "金牛座",
            Constellation::Gemini => "双子座",
            Constellation::Cancer => "巨蟹座",
            Constellation::Leo => "狮子座",
            Constellation::Virgo => "处女座",
            Constellation::Libra => "天秤座",
            Constellation::Scorpio => "天蝎座",
            Constellation::Sagittarius => "射手座",
            Constellation::Capricorn => "摩羯座",
        }
    }
}

// ============================================================================
// AGE
// ============================================================================

/// Approximate age: difference of calendar years, birthday not considered
pub fn approximate_age(birth_year: i32, current_year: i32) -> i32 {
    current_year - birth_year
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_gender_parity() {
        assert_eq!(Gender::from_digit('1'), Gender::Male);
        assert_eq!(Gender::from_digit('9'), Gender::Male);
        assert_eq!(Gender::from_digit('0'), Gender::Female);
        assert_eq!(Gender::from_digit('8'), Gender::Female);
        assert_eq!(Gender::from_digit('X'), Gender::Unknown);
        assert_eq!(Gender::from_digit('X').label(), "未知");
        assert_eq!(Gender::from_digit('3').label(), "男");
        assert_eq!(Gender::from_digit('4').label(), "女");
    }

    #[test]
    fn test_zodiac_reference_years() {
        assert_eq!(Zodiac::from_year(2020), Zodiac::Rat);
        assert_eq!(Zodiac::from_year(2024), Zodiac::Dragon);
        assert_eq!(Zodiac::from_year(1990), Zodiac::Horse);
        assert_eq!(Zodiac::from_year(1972), Zodiac::Rat);
        assert_eq!(Zodiac::from_year(2016).label(), "猴");
        assert_eq!(Zodiac::from_year(1985).label(), "牛");
    }

    #[test]
    fn test_zodiac_cycle_is_twelve_distinct() {
        let animals: HashSet<_> = (2000..2012).map(|y| Zodiac::from_year(y).label()).collect();
        assert_eq!(animals.len(), 12);
        for year in 1900..2030 {
            assert_eq!(Zodiac::from_year(year), Zodiac::from_year(year + 12));
        }
    }

    #[test]
    fn test_constellation_cusps() {
        assert_eq!(Constellation::from_month_day(1, 19), Constellation::Capricorn);
        assert_eq!(Constellation::from_month_day(1, 20), Constellation::Aquarius);
        assert_eq!(Constellation::from_month_day(2, 18), Constellation::Aquarius);
        assert_eq!(Constellation::from_month_day(2, 19), Constellation::Pisces);
        assert_eq!(Constellation::from_month_day(3, 7), Constellation::Pisces);
        assert_eq!(Constellation::from_month_day(6, 21), Constellation::Gemini);
        assert_eq!(Constellation::from_month_day(6, 22), Constellation::Cancer);
        assert_eq!(Constellation::from_month_day(10, 23), Constellation::Libra);
        assert_eq!(Constellation::from_month_day(10, 24), Constellation::Scorpio);
        assert_eq!(Constellation::from_month_day(12, 21), Constellation::Sagittarius);
        assert_eq!(Constellation::from_month_day(12, 22), Constellation::Capricorn);
        assert_eq!(Constellation::from_month_day(12, 31), Constellation::Capricorn);
        assert_eq!(Constellation::from_month_day(1, 1).label(), "摩羯座");
    }

    #[test]
    fn test_constellation_ranges_exhaustive_and_contiguous() {
        // Walking every day of a leap year, the sign only changes at the 12 cusps
        let mut seen = HashSet::new();
        let mut changes = 0;
        let mut prev = Constellation::from_month_day(1, 1);
        let days_in_month = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

        for (i, &days) in days_in_month.iter().enumerate() {
            let month = i as u32 + 1;
            for day in 1..=days {
                let sign = Constellation::from_month_day(month, day);
                seen.insert(sign);
                if sign != prev {
                    changes += 1;
                    prev = sign;
                }
            }
        }

        assert_eq!(seen.len(), 12);
        // 11 cusps inside the year + the return to Capricorn on 12/22
        assert_eq!(changes, 12);
    }

    #[test]
    fn test_approximate_age_ignores_birthday() {
        assert_eq!(approximate_age(1990, 2026), 36);
        assert_eq!(approximate_age(2026, 2026), 0);
    }
}
