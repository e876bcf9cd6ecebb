//! Flat delimited account file.
//!
//! One record per line, `ID;Phone;Balance`, terminated by `\n`. No header,
//! no escaping.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};
use wallet_types::{Account, AccountId, Money, PersistError, Phone};

const SEPARATOR: char = ';';

/// Writes every account as one `ID;Phone;Balance` line, in slice order.
pub fn write_accounts<W: Write>(mut writer: W, accounts: &[Account]) -> Result<(), PersistError> {
    for account in accounts {
        writeln!(
            writer,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            account.id, account.phone, account.balance
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads `ID;Phone;Balance` lines back into accounts.
///
/// Blank lines are skipped. The first malformed line aborts the read.
pub fn read_accounts<R: BufRead>(reader: R) -> Result<Vec<Account>, PersistError> {
    let mut accounts = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        accounts.push(parse_record(index + 1, line)?);
    }

    Ok(accounts)
}

/// Exports accounts to `path`, creating missing parent directories and
/// truncating any existing file.
#[instrument(skip_all, fields(path = %path.as_ref().display(), count = accounts.len()))]
pub fn export_accounts(path: impl AsRef<Path>, accounts: &[Account]) -> Result<(), PersistError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    write_accounts(BufWriter::new(file), accounts)?;
    debug!("Accounts exported");
    Ok(())
}

/// Imports accounts from a file previously written by [`export_accounts`].
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn import_accounts(path: impl AsRef<Path>) -> Result<Vec<Account>, PersistError> {
    let file = File::open(path.as_ref())?;
    let accounts = read_accounts(BufReader::new(file))?;
    debug!(count = accounts.len(), "Accounts imported");
    Ok(accounts)
}

fn parse_record(line: usize, record: &str) -> Result<Account, PersistError> {
    let malformed = |reason: String| PersistError::Parse { line, reason };

    // The phone is written unescaped, so take the id from the front and the
    // balance from the back.
    let (id, rest) = record
        .split_once(SEPARATOR)
        .ok_or_else(|| malformed("expected `ID;Phone;Balance`".into()))?;
    let (phone, balance) = rest
        .rsplit_once(SEPARATOR)
        .ok_or_else(|| malformed("expected `ID;Phone;Balance`".into()))?;

    let id: AccountId = id
        .parse()
        .map_err(|e| malformed(format!("invalid account id {:?}: {}", id, e)))?;
    let balance: Money = balance
        .parse()
        .map_err(|e| malformed(format!("invalid balance {:?}: {}", balance, e)))?;

    if id.value() < 1 {
        return Err(malformed(format!("account id must be at least 1, got {}", id)));
    }
    if id.next().is_none() {
        return Err(malformed(format!(
            "account id {} leaves no room for new accounts",
            id
        )));
    }
    if balance.is_negative() {
        return Err(malformed(format!("balance cannot be negative, got {}", balance)));
    }

    Ok(Account::from_parts(id, Phone::new(phone), balance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn account(id: i64, phone: &str, balance: i64) -> Account {
        Account::from_parts(AccountId::new(id), Phone::from(phone), Money::new(balance))
    }

    #[test]
    fn test_write_accounts_format() {
        let accounts = vec![account(1, "+1", 100), account(2, "+2", 200)];
        let mut out = Vec::new();

        write_accounts(&mut out, &accounts).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "1;+1;100\n2;+2;200\n");
    }

    #[test]
    fn test_write_no_accounts_is_empty() {
        let mut out = Vec::new();
        write_accounts(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_read_accounts_skips_blank_lines() {
        let input = "1;+992927777777;1549\n\n2;+992550149898;11549\r\n";

        let accounts = read_accounts(Cursor::new(input)).unwrap();

        assert_eq!(
            accounts,
            vec![
                account(1, "+992927777777", 1549),
                account(2, "+992550149898", 11549)
            ]
        );
    }

    #[test]
    fn test_read_phone_containing_separator() {
        let accounts = read_accounts(Cursor::new("7;a;b;30\n")).unwrap();
        assert_eq!(accounts, vec![account(7, "a;b", 30)]);
    }

    #[test]
    fn test_read_malformed_line_reports_line_number() {
        let input = "1;+1;100\n2;+2\n";

        let result = read_accounts(Cursor::new(input));

        assert!(matches!(result, Err(PersistError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_read_invalid_balance() {
        let result = read_accounts(Cursor::new("1;+1;ten\n"));
        assert!(matches!(result, Err(PersistError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_read_rejects_negative_balance_and_zero_id() {
        let negative = read_accounts(Cursor::new("1;+1;-5\n"));
        assert!(matches!(negative, Err(PersistError::Parse { line: 1, .. })));

        let zero_id = read_accounts(Cursor::new("1;+1;5\n0;+0;5\n"));
        assert!(matches!(zero_id, Err(PersistError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_read_rejects_max_account_id() {
        let result = read_accounts(Cursor::new("9223372036854775807;+1;5
"));
        assert!(matches!(result, Err(PersistError::Parse { line: 1, .. })));

        let accounts = read_accounts(Cursor::new("9223372036854775806;+1;5
")).unwrap();
        assert_eq!(accounts[0].id, AccountId::new(i64::MAX - 1));
    }

    #[test]
    fn test_export_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("ledger.txt");

        export_accounts(&path, &[account(1, "+1", 100), account(2, "+2", 200)]).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "1;+1;100\n2;+2;200\n");
    }

    #[test]
    fn test_export_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.txt");
        fs::write(&path, "9;+9;999\n8;+8;888\n7;+7;777\n").unwrap();

        export_accounts(&path, &[account(1, "+1", 5)]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "1;+1;5\n");
    }

    #[test]
    fn test_export_into_file_as_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let result = export_accounts(blocker.join("ledger.txt"), &[account(1, "+1", 5)]);

        assert!(matches!(result, Err(PersistError::Io(_))));
    }

    #[test]
    fn test_import_reads_exported_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.txt");
        let accounts = vec![account(1, "+1", 100), account(4, "+4", 0)];
        export_accounts(&path, &accounts).unwrap();

        let imported = import_accounts(&path).unwrap();

        assert_eq!(imported, accounts);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_accounts(dir.path().join("absent.txt"));
        assert!(matches!(result, Err(PersistError::Io(_))));
    }
}
