const RETRY_MASK: u16 = 0x07;
const RETRY_SHIFT: u32 = u16::trailing_zeros(RETRY_MASK);

const RESPONSE_BIT: u16 = 0x08;

pub const RESPONSE: Flags = Response(true);
pub const NO_FLAG: Flags = Combined(0);

/// Options for a single GATT write, combinable with `|`.
///
/// `Response` requests an acknowledged write; the probed firmware accepts
/// unacknowledged writes on every characteristic, so that is the default.
/// `Retries` is the number of extra attempts a driver may make after a
/// timeout.
#[derive(Debug, Clone)]
pub enum Flags {
    Empty,
    Retries(u16),
    Response(bool),
    Combined(u16),
}

use Flags::*;
impl Flags {
    const fn bits(&self) -> u16 {
        match *self {
            Empty => 0,
            Retries(n) => (n << RETRY_SHIFT) & RETRY_MASK,
            Response(r) => {
                if r {
                    RESPONSE_BIT
                } else {
                    0
                }
            }
            Combined(b) => b,
        }
    }

    pub const fn response(&self) -> bool {
        (self.bits() & RESPONSE_BIT) != 0
    }

    pub const fn retries(&self) -> u16 {
        (self.bits() & RETRY_MASK) >> RETRY_SHIFT
    }
}

impl std::ops::BitOr<Flags> for Flags {
    type Output = Self;
    fn bitor(self, other: Flags) -> Self::Output {
        let b = self.bits();
        let masked = match other {
            Empty => b,
            Retries(_) => b & !RETRY_MASK,
            Response(_) => b & !RESPONSE_BIT,
            Combined(_) => b,
        };
        Combined(masked | other.bits())
    }
}

impl std::ops::BitOrAssign<Flags> for Flags {
    fn bitor_assign(&mut self, other: Flags) {
        let b = self.bits();
        let masked = match other {
            Empty => b,
            Retries(_) => b & !RETRY_MASK,
            Response(_) => b & !RESPONSE_BIT,
            Combined(_) => b,
        };
        *self = Combined(masked | other.bits());
    }
}

#[cfg(test)]
mod test {
    use super::{Flags, NO_FLAG, RESPONSE};

    #[test]
    fn test_combining() {
        let f = NO_FLAG | Flags::Retries(3) | RESPONSE;
        assert!(f.response());
        assert_eq!(f.retries(), 3);

        // Later flags of the same kind replace earlier ones
        let f = f | Flags::Retries(1) | Flags::Response(false);
        assert!(!f.response());
        assert_eq!(f.retries(), 1);
    }

    #[test]
    fn test_defaults() {
        assert!(!NO_FLAG.response());
        assert_eq!(NO_FLAG.retries(), 0);
    }
}
