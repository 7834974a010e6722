//! Help and usage replies, rendered with the dispatcher's prefix.

pub fn help(prefix: &str) -> String {
    format!(
        "Scheduler usage:\n\
         `{prefix} add [me | User] day timeStart timeEnd (opt.) notes` - record your availability for a day\n\
         `{prefix} update [me | User] day timeStart timeEnd (opt.) notes` - change an existing availability\n\
         `{prefix} check [me | User]` - show someone's availability for the week\n\
         `{prefix} available (opt.) day` - show everyone's availability\n\
         `{prefix} help` - show this message\n\
         Times are 24-hour, 00:00 to 23:59. Days are Sunday thru Saturday."
    )
}

pub fn add(prefix: &str) -> String {
    format!(
        "Add usage: {prefix} add [me | User] day timeStart timeEnd (opt.) notes\n\
         Example: {prefix} add @Username Sunday 15:00 18:00"
    )
}

pub fn update(prefix: &str) -> String {
    format!(
        "Update usage: {prefix} update [me | User] day timeStart timeEnd (opt.) notes\n\
         Example: {prefix} update @Username Sunday 18:00 22:00 Need to run errands in the afternoon"
    )
}

pub fn check(prefix: &str) -> String {
    format!(
        "Check usage: {prefix} check [me | User]\n\
         Example: {prefix} check @Username"
    )
}

pub fn available(prefix: &str) -> String {
    format!(
        "Available usage: {prefix} available (opt.) day\n\
         Example: {prefix} available Friday"
    )
}
