/// Line terminator written after every entry.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator written after every entry.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Turn a relative source path into the dotted name stored in a resource list.
///
/// Separators are unified to `/`, the first occurrence of `.<extension>` is removed and the
/// remaining separators become dots, so `pipelet/checkout/Foo.xml` turns into
/// `pipelet.checkout.Foo`.
pub fn resource_entry_name(relative_path: &str, file_extension: &str) -> String {
  let unified = relative_path.replace('\\', "/");
  let suffix = format!(".{file_extension}");
  unified.replacen(&suffix, "", 1).replace('/', ".")
}
