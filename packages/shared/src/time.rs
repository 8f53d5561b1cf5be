use chrono::{DateTime, Duration, Utc};

/// Current time in UTC
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Unix timestamp (seconds) `minutes` from now, as used for token expiry
pub fn unix_timestamp_after_minutes(minutes: i64) -> i64 {
    (Utc::now() + Duration::minutes(minutes)).timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_timestamp_after_minutes_is_in_the_future() {
        // テスト項目: 指定した分数だけ未来の Unix タイムスタンプが返される
        // given (前提条件):
        let now = Utc::now().timestamp();

        // when (操作):
        let later = unix_timestamp_after_minutes(30);

        // then (期待する結果):
        assert!(later >= now + 30 * 60);
        assert!(later <= now + 30 * 60 + 5);
    }
}
