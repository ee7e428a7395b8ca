//! Hexadecimal keypad state.

/// One of the sixteen keys on the hexadecimal keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Key {
    Key0 = 0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF = 0xF,
}

impl Key {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let key_id = self.as_u8();
        write!(f, "k{key_id:x}")
    }
}

impl From<Key> for u8 {
    fn from(key: Key) -> Self {
        key.as_u8()
    }
}

impl TryFrom<u8> for Key {
    type Error = InvalidKey;

    fn try_from(key_id: u8) -> Result<Self, Self::Error> {
        match key_id {
            0 => Ok(Self::Key0),
            1 => Ok(Self::Key1),
            2 => Ok(Self::Key2),
            3 => Ok(Self::Key3),
            4 => Ok(Self::Key4),
            5 => Ok(Self::Key5),
            6 => Ok(Self::Key6),
            7 => Ok(Self::Key7),
            8 => Ok(Self::Key8),
            9 => Ok(Self::Key9),
            10 => Ok(Self::KeyA),
            11 => Ok(Self::KeyB),
            12 => Ok(Self::KeyC),
            13 => Ok(Self::KeyD),
            14 => Ok(Self::KeyE),
            15 => Ok(Self::KeyF),
            _ => Err(InvalidKey),
        }
    }
}

#[derive(Debug)]
pub struct InvalidKey;

impl std::error::Error for InvalidKey {}

impl std::fmt::Display for InvalidKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "key must be in range 0 <= key < 16")
    }
}

/// Pressed state of all sixteen keys. Pressed is a 1 bit, released is
/// a 0 bit.
#[derive(Debug, Default)]
pub struct Keypad {
    state: u16,
}

impl Keypad {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn press(&mut self, key: Key) {
        self.state |= 1 << key.as_u8();
    }

    pub fn release(&mut self, key: Key) {
        self.state &= !(1 << key.as_u8());
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.state & (1 << key.as_u8()) != 0
    }

    /// Set all keys to up.
    pub fn clear(&mut self) {
        self.state = 0;
    }

    /// Check whether any key is pressed down.
    #[inline(always)]
    pub fn any_pressed(&self) -> bool {
        self.state != 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::KEY_COUNT;

    #[test]
    fn test_press_release() {
        let mut keypad = Keypad::new();

        keypad.press(Key::Key0);
        assert!(keypad.is_pressed(Key::Key0));
        assert!(!keypad.is_pressed(Key::Key1));
        assert!(!keypad.is_pressed(Key::Key7));

        keypad.press(Key::Key7);
        assert!(keypad.is_pressed(Key::Key0));
        assert!(keypad.is_pressed(Key::Key7));

        keypad.release(Key::Key0);
        assert!(!keypad.is_pressed(Key::Key0));
        assert!(keypad.is_pressed(Key::Key7));

        keypad.press(Key::KeyF);
        assert!(keypad.is_pressed(Key::KeyF));
        assert!(keypad.any_pressed());

        keypad.clear();
        assert!(!keypad.any_pressed());
    }

    #[test]
    fn test_key_conversions() {
        assert_eq!(Key::try_from(0xC).unwrap(), Key::KeyC);
        assert_eq!(u8::from(Key::KeyC), 0xC);
        assert!(Key::try_from(KEY_COUNT).is_err());
        assert_eq!(Key::Key5.to_string(), "k5");
    }
}
