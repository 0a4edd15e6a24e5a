//! User and group database lookups (`/etc/passwd`, `/etc/group`, NSS).

use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::os::raw::c_char;

use eyre::{bail, eyre, Result};

const INITIAL_BUFFER: usize = 1024;
const MAX_BUFFER: usize = 1 << 20;

/// Login name for `uid`.
pub fn user_name(uid: u32) -> Result<String> {
    let entry = lookup(|pwd: *mut libc::passwd, buf, len, result| unsafe {
        libc::getpwuid_r(uid, pwd, buf, len, result)
    })
    .map_err(|err| eyre!("failed to look up uid {uid}: {err}"))?;
    match entry {
        Some(pwd) => Ok(unsafe { c_string(pwd.pw_name) }),
        None => bail!("no user entry for uid {uid}"),
    }
}

/// Group name for `gid`.
pub fn group_name(gid: u32) -> Result<String> {
    let entry = lookup(|grp: *mut libc::group, buf, len, result| unsafe {
        libc::getgrgid_r(gid, grp, buf, len, result)
    })
    .map_err(|err| eyre!("failed to look up gid {gid}: {err}"))?;
    match entry {
        Some(grp) => Ok(unsafe { c_string(grp.gr_name) }),
        None => bail!("no group entry for gid {gid}"),
    }
}

/// Numeric uid for the login `name`.
pub fn uid_for(name: &str) -> Result<u32> {
    let c_name = CString::new(name).map_err(|_| eyre!("invalid user name {name:?}"))?;
    let entry = lookup(|pwd: *mut libc::passwd, buf, len, result| unsafe {
        libc::getpwnam_r(c_name.as_ptr(), pwd, buf, len, result)
    })
    .map_err(|err| eyre!("failed to look up user '{name}': {err}"))?;
    match entry {
        Some(pwd) => Ok(pwd.pw_uid),
        None => bail!("unknown user '{name}'"),
    }
}

/// Numeric gid for the group `name`.
pub fn gid_for(name: &str) -> Result<u32> {
    let c_name = CString::new(name).map_err(|_| eyre!("invalid group name {name:?}"))?;
    let entry = lookup(|grp: *mut libc::group, buf, len, result| unsafe {
        libc::getgrnam_r(c_name.as_ptr(), grp, buf, len, result)
    })
    .map_err(|err| eyre!("failed to look up group '{name}': {err}"))?;
    match entry {
        Some(grp) => Ok(grp.gr_gid),
        None => bail!("unknown group '{name}'"),
    }
}

/// Drive one of the reentrant `get*_r` calls, growing the scratch buffer on
/// `ERANGE`. String pointers in the returned entry point into that buffer, so
/// callers copy what they need through the `Entry` before it is dropped.
fn lookup<T, F>(mut call: F) -> std::result::Result<Option<Entry<T>>, std::io::Error>
where
    F: FnMut(*mut T, *mut c_char, libc::size_t, *mut *mut T) -> libc::c_int,
{
    let mut len = INITIAL_BUFFER;
    loop {
        let mut buf: Vec<c_char> = vec![0; len];
        let mut entry = MaybeUninit::<T>::uninit();
        let mut result: *mut T = std::ptr::null_mut();

        let rc = call(entry.as_mut_ptr(), buf.as_mut_ptr(), len, &mut result);
        if rc == libc::ERANGE && len < MAX_BUFFER {
            len *= 2;
            continue;
        }
        if rc != 0 {
            return Err(std::io::Error::from_raw_os_error(rc));
        }
        if result.is_null() {
            return Ok(None);
        }
        // SAFETY: a zero return with a non-null result means `entry` was filled in.
        let value = unsafe { entry.assume_init() };
        return Ok(Some(Entry { value, _buf: buf }));
    }
}

/// A looked-up database entry together with the buffer its strings live in.
struct Entry<T> {
    value: T,
    _buf: Vec<c_char>,
}

impl<T> std::ops::Deref for Entry<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

/// # Safety
/// `ptr` must be a valid NUL-terminated string.
unsafe fn c_string(ptr: *const c_char) -> String {
    CStr::from_ptr(ptr).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_both_ways() {
        assert_eq!(user_name(0).unwrap(), "root");
        assert_eq!(uid_for("root").unwrap(), 0);
    }

    #[test]
    fn current_group_round_trips() {
        let gid = unsafe { libc::getgid() };
        let Ok(name) = group_name(gid) else {
            // Containers may run with a gid that has no group entry.
            return;
        };
        assert_eq!(gid_for(&name).unwrap(), gid);
    }

    #[test]
    fn unknown_names_fail() {
        let err = uid_for("gitmeta-no-such-user").unwrap_err();
        assert!(err.to_string().contains("unknown user"), "{err}");
        let err = gid_for("gitmeta-no-such-group").unwrap_err();
        assert!(err.to_string().contains("unknown group"), "{err}");
    }

    #[test]
    fn interior_nul_is_rejected() {
        assert!(uid_for("ro\0ot").is_err());
    }
}
