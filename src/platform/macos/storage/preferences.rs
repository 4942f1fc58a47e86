//! NSUserDefaults-backed preference store.

use crate::platform::macos::ffi::bridge::{get_class, id, msg_send, nsstring_id, nsstring_to_string};
use crate::storage::PreferenceStore;

/// `+[NSUserDefaults standardUserDefaults]`. Stateless, so window delegate
/// callbacks can persist without touching the app controller.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserDefaultsStore;

impl UserDefaultsStore {
    fn defaults() -> id {
        unsafe { msg_send![get_class("NSUserDefaults"), standardUserDefaults] }
    }
}

impl PreferenceStore for UserDefaultsStore {
    fn get_string(&self, key: &str) -> Option<String> {
        unsafe {
            let value: id = msg_send![Self::defaults(), stringForKey: nsstring_id(key)];
            nsstring_to_string(value)
        }
    }

    fn set_string(&self, key: &str, value: &str) {
        unsafe {
            let _: () = msg_send![
                Self::defaults(),
                setObject: nsstring_id(value),
                forKey: nsstring_id(key)
            ];
        }
    }
}
