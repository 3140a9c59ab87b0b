/*
 * Responsibility
 * - 所有者チェック (ownership policy)
 * - post / comment の update・delete で同一のルールを使う
 *
 * Notes
 * - 呼び出し順は「存在チェック → 所有チェック」。存在しない id はここまで来ない
 *   ので、NotAuthorized が NotFound より先に漏れることはない。
 * - owner は必ず保存済みの行から渡すこと。リクエスト payload 由来の author を
 *   渡してはいけない。
 */
use uuid::Uuid;

use crate::services::error::ServiceError;

pub fn ensure_owner(
    resource: &'static str,
    owner_id: Uuid,
    caller_id: Uuid,
) -> Result<(), ServiceError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(ServiceError::NotAuthorized(resource))
    }
}
