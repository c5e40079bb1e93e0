//! Response code tables and localized status messages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display language for the gateway page and status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Vietnamese, sent to OnePay as `vn`.
    Vn,
    /// English, sent to OnePay as `en`.
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Vn, Locale::En];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Locale::Vn => "vn",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vn" => Ok(Locale::Vn),
            "en" => Ok(Locale::En),
            _ => Err(()),
        }
    }
}

/// A message in both supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedMessage {
    pub vn: &'static str,
    pub en: &'static str,
}

impl LocalizedMessage {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Vn => self.vn,
            Locale::En => self.en,
        }
    }
}

/// Static lookup of `(response code, locale) -> message`.
#[derive(Debug)]
pub struct ResponseTable {
    entries: &'static [(&'static str, LocalizedMessage)],
    fallback: LocalizedMessage,
}

impl ResponseTable {
    /// Message for a response code, or the table's fallback for unknown codes.
    pub fn message(&self, code: &str, locale: Locale) -> &'static str {
        self.entries
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, message)| message.get(locale))
            .unwrap_or_else(|| self.fallback.get(locale))
    }

    /// Returns true if the code is declared in this table.
    pub fn contains(&self, code: &str) -> bool {
        self.entries.iter().any(|(known, _)| *known == code)
    }

    /// Declared response codes, in table order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    pub fn fallback(&self) -> LocalizedMessage {
        self.fallback
    }
}

const fn msg(vn: &'static str, en: &'static str) -> LocalizedMessage {
    LocalizedMessage { vn, en }
}

/// Message used when the recomputed secure hash does not match.
pub const INTEGRITY_FAILURE: LocalizedMessage = msg(
    "Sai mã kiểm tra dữ liệu (checksum)",
    "Invalid checksum",
);

/// Domestic ATM card gateway response codes.
pub static DOMESTIC_RESPONSES: ResponseTable = ResponseTable {
    entries: &[
        ("0", msg("Giao dịch thành công", "Approved")),
        ("1", msg("Ngân hàng từ chối giao dịch", "Bank Declined")),
        ("3", msg("Mã đơn vị không tồn tại", "Merchant not exist")),
        ("4", msg("Không đúng access code", "Invalid access code")),
        ("5", msg("Số tiền không hợp lệ", "Invalid amount")),
        ("6", msg("Mã tiền tệ không tồn tại", "Invalid currency code")),
        ("7", msg("Lỗi không xác định", "Unspecified Failure")),
        ("8", msg("Số thẻ không đúng", "Invalid card Number")),
        ("9", msg("Tên chủ thẻ không đúng", "Invalid card name")),
        ("10", msg("Thẻ hết hạn/Thẻ bị khóa", "Expired Card")),
        (
            "11",
            msg(
                "Thẻ chưa đăng ký sử dụng dịch vụ",
                "Card Not Registed Service(internet banking)",
            ),
        ),
        ("12", msg("Ngày phát hành/Hết hạn không đúng", "Invalid card date")),
        ("13", msg("Vượt quá hạn mức thanh toán", "Exist Amount")),
        ("21", msg("Số tiền không đủ để thanh toán", "Insufficient fund")),
        ("22", msg("Thông tin tài khoản không đúng", "Invalid Account")),
        ("23", msg("Tài khoản bị khóa", "Account Locked")),
        ("24", msg("Thông tin thẻ không đúng", "Invalid Card Info")),
        ("25", msg("OTP không đúng", "Invalid OTP")),
        ("253", msg("Quá thời gian thanh toán", "Transaction timeout")),
        ("99", msg("Người sử dụng hủy giao dịch", "User cancel")),
    ],
    fallback: msg("Giao dịch thất bại", "Failured"),
};

/// International card gateway response codes.
pub static INTERNATIONAL_RESPONSES: ResponseTable = ResponseTable {
    entries: &[
        ("0", msg("Giao dịch thành công", "Transaction Successful")),
        ("1", msg("Ngân hàng từ chối giao dịch", "Bank system reject")),
        ("2", msg("Ngân hàng từ chối giao dịch", "Bank Declined Transaction")),
        ("3", msg("Ngân hàng không phản hồi", "No Reply from Bank")),
        ("4", msg("Thẻ hết hạn", "Expired Card")),
        ("5", msg("Số dư không đủ để thanh toán", "Insufficient funds")),
        ("6", msg("Lỗi kết nối với ngân hàng", "Error Communicating with Bank")),
        ("7", msg("Lỗi hệ thống thanh toán", "Payment Server System Error")),
        ("8", msg("Loại giao dịch không được hỗ trợ", "Transaction Type Not Supported")),
        (
            "9",
            msg(
                "Ngân hàng từ chối giao dịch (không liên hệ ngân hàng)",
                "Bank declined transaction (Do not contact Bank)",
            ),
        ),
        ("A", msg("Giao dịch bị hủy bỏ", "Transaction Aborted")),
        ("C", msg("Giao dịch đã bị hủy", "Transaction Cancelled")),
        (
            "D",
            msg(
                "Giao dịch trì hoãn đã được tiếp nhận và đang chờ xử lý",
                "Deferred transaction has been received and is awaiting processing",
            ),
        ),
        ("F", msg("Xác thực 3D Secure thất bại", "3D Secure Authentication failed")),
        (
            "I",
            msg(
                "Mã bảo mật thẻ không đúng",
                "Card Security Code verification failed",
            ),
        ),
        ("L", msg("Giao dịch mua hàng bị khóa", "Shopping Transaction Locked")),
        (
            "N",
            msg(
                "Chủ thẻ chưa đăng ký xác thực",
                "Cardholder is not enrolled in Authentication scheme",
            ),
        ),
        (
            "P",
            msg(
                "Giao dịch đã được tiếp nhận và đang xử lý",
                "Transaction has been received by the Payment Adaptor and is being processed",
            ),
        ),
        (
            "R",
            msg(
                "Giao dịch không được xử lý do vượt quá số lần thử cho phép",
                "Transaction was not processed - Reached limit of retry attempts allowed",
            ),
        ),
        ("S", msg("Trùng mã phiên giao dịch (OrderInfo)", "Duplicate SessionID (OrderInfo)")),
        ("T", msg("Xác thực địa chỉ thất bại", "Address Verification Failed")),
        ("U", msg("Mã bảo mật thẻ thất bại", "Card Security Code Failed")),
        (
            "V",
            msg(
                "Xác thực địa chỉ và mã bảo mật thẻ thất bại",
                "Address Verification and Card Security Code Failed",
            ),
        ),
        ("99", msg("Người sử dụng hủy giao dịch", "User Cancel")),
    ],
    fallback: msg("Giao dịch thất bại", "Unknown Failure"),
};

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> [&'static ResponseTable; 2] {
        [&DOMESTIC_RESPONSES, &INTERNATIONAL_RESPONSES]
    }

    #[test]
    fn every_declared_code_has_messages_in_both_locales() {
        for table in tables() {
            for code in table.codes() {
                for locale in Locale::ALL {
                    assert!(
                        !table.message(code, locale).is_empty(),
                        "code {} has no {} message",
                        code,
                        locale
                    );
                }
            }
        }
    }

    #[test]
    fn unknown_code_uses_fallback() {
        assert_eq!(DOMESTIC_RESPONSES.message("X42", Locale::En), "Failured");
        assert_eq!(
            INTERNATIONAL_RESPONSES.message("X42", Locale::En),
            "Unknown Failure"
        );
        assert_eq!(
            DOMESTIC_RESPONSES.message("", Locale::Vn),
            "Giao dịch thất bại"
        );
    }

    #[test]
    fn fallbacks_are_not_empty() {
        for table in tables() {
            for locale in Locale::ALL {
                assert!(!table.fallback().get(locale).is_empty());
            }
        }
    }

    #[test]
    fn approved_messages() {
        assert_eq!(DOMESTIC_RESPONSES.message("0", Locale::En), "Approved");
        assert_eq!(
            DOMESTIC_RESPONSES.message("0", Locale::Vn),
            "Giao dịch thành công"
        );
        assert_eq!(
            INTERNATIONAL_RESPONSES.message("0", Locale::En),
            "Transaction Successful"
        );
    }

    #[test]
    fn codes_are_unique_within_each_table() {
        for table in tables() {
            let codes: Vec<_> = table.codes().collect();
            for (i, code) in codes.iter().enumerate() {
                assert!(!codes[i + 1..].contains(code), "duplicate code {}", code);
            }
        }
    }

    #[test]
    fn locale_round_trips_through_str() {
        for locale in Locale::ALL {
            assert_eq!(locale.as_str().parse::<Locale>(), Ok(locale));
        }
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn integrity_failure_message_is_localized() {
        assert_eq!(INTEGRITY_FAILURE.get(Locale::En), "Invalid checksum");
        assert!(!INTEGRITY_FAILURE.get(Locale::Vn).is_empty());
    }
}
