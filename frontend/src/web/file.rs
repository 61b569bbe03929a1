//! 浏览器文件操作：读取选中的文件、保存下载内容、确认对话框

use ged_shared::error::{ClientError, ClientResult};
use ged_shared::{FileDownload, FileUpload};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, Url};

fn js_error(context: &str, e: JsValue) -> ClientError {
    ClientError::serialization(format!("{}: {:?}", context, e))
}

pub(crate) fn bytes_to_blob(bytes: &[u8], content_type: &str) -> ClientResult<Blob> {
    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    if !content_type.is_empty() {
        options.set_type(content_type);
    }
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| js_error("创建 Blob 失败", e))
}

/// 把 `<input type="file">` 选中的文件读入内存
pub async fn read_file(file: File) -> ClientResult<FileUpload> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| js_error("读取文件失败", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(FileUpload::new(file.name(), file.type_(), bytes))
}

/// 通过临时的 object URL 触发浏览器下载
///
/// 文件名优先取响应头中的建议值，否则使用 `fallback_name`。
pub fn save_download(download: &FileDownload, fallback_name: &str) -> ClientResult<()> {
    let content_type = download.content_type.as_deref().unwrap_or_default();
    let blob = bytes_to_blob(&download.bytes, content_type)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(|e| js_error("创建下载链接失败", e))?;

    let result = click_download_link(&url, download.file_name.as_deref().unwrap_or(fallback_name));
    if Url::revoke_object_url(&url).is_err() {
        tracing::warn!(url = %url, "failed to revoke object url");
    }
    result
}

fn click_download_link(url: &str, file_name: &str) -> ClientResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ClientError::serialization("无法获取 document 对象"))?;
    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| js_error("创建链接失败", e))?
        .dyn_into()
        .map_err(|_| ClientError::serialization("元素类型转换失败"))?;

    link.set_href(url);
    link.set_download(file_name);
    link.click();
    Ok(())
}

/// `window.confirm`；无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
