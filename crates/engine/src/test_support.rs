//! Shell scripts standing in for 7-Zip in process-level tests.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Write an executable `sh` script named `name` into `dir`.
#[cfg(unix)]
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake tool");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
    path
}

/// A fake 7-Zip that answers the probe, prints `listing` for `l`, records
/// its extract arguments into `args.log` and runs `on_extract` for `x`.
#[cfg(unix)]
pub fn fake_7z(dir: &Path, listing: &str, on_extract: &str) -> PathBuf {
    let log = dir.join("args.log");
    let listing_file = dir.join("listing.txt");
    fs::write(&listing_file, listing).expect("write listing");

    let body = format!(
        r#"case "$1" in
  "") echo "7-Zip (fake)"; exit 0 ;;
  l) printf '%s\n' "$@" > "{log}.list"; cat "{listing}"; exit 0 ;;
  x) printf '%s\n' "$@" > "{log}"; {on_extract} ;;
  *) echo "unsupported command" >&2; exit 7 ;;
esac"#,
        log = log.display(),
        listing = listing_file.display(),
    );
    fake_tool(dir, "7z", &body)
}

/// Arguments recorded by the last invocation of [`fake_7z`] with `verb`.
pub fn recorded_args(dir: &Path, verb: &str) -> Vec<String> {
    let file = match verb {
        "l" => dir.join("args.log.list"),
        _ => dir.join("args.log"),
    };
    fs::read_to_string(file)
        .expect("read recorded args")
        .lines()
        .map(str::to_owned)
        .collect()
}

pub fn argv(parts: &[&str]) -> Vec<OsString> {
    parts.iter().map(OsString::from).collect()
}

/// `7z l -slt` output for a small archive: one directory, two files.
pub const SAMPLE_LISTING: &str = "\
7-Zip [64] 16.02 : Copyright (c) 1999-2016 Igor Pavlov : 2016-05-21
p7zip Version 16.02 (locale=en_US.UTF-8,Utf16=on,HugeFiles=on,64 bits,8 CPUs)

Scanning the drive for archives:
1 file, 412 bytes (1 KiB)

Listing archive: sample.7z

--
Path = sample.7z
Type = 7z
Physical Size = 412
Headers Size = 228
Method = LZMA2:12
Solid = +
Blocks = 1

----------
Path = docs
Size = 0
Packed Size = 0
Modified = 2021-03-04 05:06:07
Attributes = D_ drwxr-xr-x
CRC =
Encrypted = -
Method =
Block =

Path = docs/readme.txt
Size = 120
Packed Size = 80
Modified = 2021-03-04 05:06:08
Attributes = A_ -rw-r--r--
CRC = 3610A686
Encrypted = -
Method = LZMA2:12
Block = 0

Path = notes.txt
Size = 5
Packed Size =
Modified = 2021-03-04 05:06:09
Attributes = A_ -rw-r--r--
CRC = 00000001
Encrypted = -
Method = LZMA2:12
Block = 0

";
