//! node/key — типизированные ключи индекса.
//!
//! Три kind'а: Int (i64), Str (байтовая строка), Ts (unix-секунды).
//! Внутри одного узла все ключи одного kind'а; смешение запрещено на
//! уровне Node::add.
//!
//! Порядок строковых ключей — порядок их значений как big-endian
//! беззнаковых целых: ведущие нулевые байты незначимы, более короткая
//! строка ведёт себя как дополненная нулями в старших разрядах. Дистанция
//! для строк — точная знаковая разность (sign + magnitude), остальные
//! kind'ы укладываются в i64.

use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::{KIND_INT, KIND_STR, KIND_TS};

/// Kind ключа. `Unset` — у пустого узла, у самих ключей не бывает.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Unset,
    Int,
    Str,
    Ts,
}

impl KeyKind {
    /// Kind по тегу из payload.
    pub(crate) fn from_tag(tag: u8) -> Option<KeyKind> {
        match tag {
            KIND_INT => Some(KeyKind::Int),
            KIND_STR => Some(KeyKind::Str),
            KIND_TS => Some(KeyKind::Ts),
            _ => None,
        }
    }
}

/// Ключ индекса с inline-тегом kind'а.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Int(i64),
    Str(Vec<u8>),
    Ts(i64), // unix-секунды
}

impl Key {
    #[inline]
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Int(_) => KeyKind::Int,
            Key::Str(_) => KeyKind::Str,
            Key::Ts(_) => KeyKind::Ts,
        }
    }

    /// Тег kind'а в payload.
    #[inline]
    pub(crate) fn tag(&self) -> u8 {
        match self {
            Key::Int(_) => KIND_INT,
            Key::Str(_) => KIND_STR,
            Key::Ts(_) => KIND_TS,
        }
    }

    /// Строковый ключ из чего угодно байтового.
    pub fn str(s: impl Into<Vec<u8>>) -> Key {
        Key::Str(s.into())
    }

    /// Ключ-временная метка, усечённая до целых секунд.
    pub fn ts_from(t: SystemTime) -> Key {
        let secs = match t.duration_since(UNIX_EPOCH) {
            Ok(d) => d.as_secs().min(i64::MAX as u64) as i64,
            // До эпохи — отрицательные секунды.
            Err(e) => -(e.duration().as_secs().min(i64::MAX as u64) as i64),
        };
        Key::Ts(secs)
    }

    pub fn ts_now() -> Key {
        Key::ts_from(SystemTime::now())
    }

    /// Полный порядок по значению внутри kind'а; между kind'ами — по тегу.
    /// Узлы kind'ы не смешивают, так что межвидовая ветка нужна только
    /// для тотальности компаратора.
    pub fn compare(&self, other: &Key) -> Ordering {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Str(a), Key::Str(b)) => be_uint_cmp(a, b),
            (Key::Ts(a), Key::Ts(b)) => a.cmp(b),
            _ => self.tag().cmp(&other.tag()),
        }
    }

    /// Дистанция `to − self` по kind'у; `None` при несовпадении kind'ов.
    pub fn distance_to(&self, to: &Key) -> Option<Distance> {
        match (self, to) {
            (Key::Int(a), Key::Int(b)) => Some(Distance::Fixed(b.wrapping_sub(*a))),
            (Key::Ts(a), Key::Ts(b)) => Some(Distance::Fixed(b.wrapping_sub(*a))),
            (Key::Str(a), Key::Str(b)) => Some(Distance::Big(ByteDistance::between(a, b))),
            _ => None,
        }
    }
}

/// Знаковая дистанция между ключами одного kind'а.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distance {
    Fixed(i64),
    Big(ByteDistance),
}

impl Distance {
    /// Отрицательная дистанция означает: цель на стороне "less".
    #[inline]
    pub fn is_negative(&self) -> bool {
        match self {
            Distance::Fixed(v) => *v < 0,
            Distance::Big(d) => d.is_negative(),
        }
    }

    /// Сравнение |self| и |other|. Смешанные варианты сравниваются как
    /// big-endian величины, чтобы порядок оставался тотальным.
    pub fn abs_cmp(&self, other: &Distance) -> Ordering {
        match (self, other) {
            (Distance::Fixed(a), Distance::Fixed(b)) => a.unsigned_abs().cmp(&b.unsigned_abs()),
            (Distance::Big(a), Distance::Big(b)) => a.magnitude_cmp(b),
            (Distance::Fixed(a), Distance::Big(b)) => {
                be_uint_cmp(&a.unsigned_abs().to_be_bytes(), b.magnitude())
            }
            (Distance::Big(a), Distance::Fixed(b)) => {
                be_uint_cmp(a.magnitude(), &b.unsigned_abs().to_be_bytes())
            }
        }
    }
}

/// Точная знаковая разность двух big-endian беззнаковых целых.
/// Нулевая разность не отрицательна, magnitude хранится без ведущих нулей.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteDistance {
    negative: bool,
    magnitude: Vec<u8>,
}

impl ByteDistance {
    /// `to − from` над байтами как big-endian целыми.
    pub fn between(from: &[u8], to: &[u8]) -> ByteDistance {
        let from = trim_leading_zeros(from);
        let to = trim_leading_zeros(to);
        match be_uint_cmp(to, from) {
            Ordering::Equal => ByteDistance {
                negative: false,
                magnitude: Vec::new(),
            },
            Ordering::Greater => ByteDistance {
                negative: false,
                magnitude: sub_be(to, from),
            },
            Ordering::Less => ByteDistance {
                negative: true,
                magnitude: sub_be(from, to),
            },
        }
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    #[inline]
    pub fn magnitude(&self) -> &[u8] {
        &self.magnitude
    }

    /// Сравнение величин (|self| vs |other|).
    pub fn magnitude_cmp(&self, other: &ByteDistance) -> Ordering {
        be_uint_cmp(&self.magnitude, &other.magnitude)
    }
}

#[inline]
fn trim_leading_zeros(a: &[u8]) -> &[u8] {
    let start = a.iter().position(|b| *b != 0).unwrap_or(a.len());
    &a[start..]
}

/// Сравнение байтовых строк как big-endian беззнаковых целых.
pub(crate) fn be_uint_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Разность `larger − smaller` (big-endian, larger >= smaller), поразрядно
/// с заёмом; результат без ведущих нулей.
fn sub_be(larger: &[u8], smaller: &[u8]) -> Vec<u8> {
    let mut out = larger.to_vec();
    let shift = larger.len() - smaller.len();
    let mut borrow = 0i16;
    for i in (0..out.len()).rev() {
        let s = if i >= shift {
            i16::from(smaller[i - shift])
        } else {
            0
        };
        let mut v = i16::from(out[i]) - s - borrow;
        if v < 0 {
            v += 256;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out[i] = v as u8;
    }
    let start = out.iter().position(|b| *b != 0).unwrap_or(out.len());
    out.drain(..start);
    out
}
