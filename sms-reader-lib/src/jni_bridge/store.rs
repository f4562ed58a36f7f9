//! Message store backed by the telephony content provider.

use super::types::java_vm;
use crate::error::{Error, Result};
use crate::storage::{
    ColumnValue, InboxQuery, MessageStore, StoreRow, COLUMN_BODY, COLUMN_DATE, PROJECTION,
};
use jni::objects::{GlobalRef, JByteArray, JObject, JObjectArray, JString, JValue};
use jni::JNIEnv;
use log::{debug, warn};

pub const SMS_INBOX_URI: &str = "content://sms/inbox";

/// `Cursor.FIELD_TYPE_*`
const FIELD_TYPE_NULL: i32 = 0;
const FIELD_TYPE_INTEGER: i32 = 1;
const FIELD_TYPE_FLOAT: i32 = 2;
const FIELD_TYPE_BLOB: i32 = 4;

pub struct ContentResolverStore {
    context: GlobalRef,
}

impl ContentResolverStore {
    pub fn new(context: GlobalRef) -> Self {
        Self { context }
    }

    fn open_cursor<'local>(
        &self,
        env: &mut JNIEnv<'local>,
        query: &InboxQuery<'_>,
    ) -> jni::errors::Result<JObject<'local>> {
        let uri_str = env.new_string(SMS_INBOX_URI)?;
        let uri = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&uri_str)],
            )?
            .l()?;

        let (selection, args) = query.filter.like_selection(COLUMN_BODY);
        debug!("content provider selection: {}", selection);
        let projection = string_array(env, &PROJECTION[..])?;
        let selection = env.new_string(selection)?;
        let selection_args = string_array(env, &args[..])?;
        let sort_order = env.new_string(format!("{} DESC", COLUMN_DATE))?;

        let resolver = env
            .call_method(
                self.context.as_obj(),
                "getContentResolver",
                "()Landroid/content/ContentResolver;",
                &[],
            )?
            .l()?;

        env.call_method(
            &resolver,
            "query",
            "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)Landroid/database/Cursor;",
            &[
                JValue::Object(&uri),
                JValue::Object(&projection),
                JValue::Object(&selection),
                JValue::Object(&selection_args),
                JValue::Object(&sort_order),
            ],
        )?
        .l()
    }
}

impl MessageStore for ContentResolverStore {
    fn query_inbox(
        &self,
        query: &InboxQuery<'_>,
        visit: &mut dyn FnMut(StoreRow) -> Result<()>,
    ) -> Result<()> {
        let vm = java_vm().map_err(Error::query)?;
        let mut env = vm.attach_current_thread().map_err(Error::query)?;

        let cursor = match self.open_cursor(&mut env, query) {
            Ok(cursor) => cursor,
            Err(e) => return Err(java_error(&mut env, e)),
        };
        // The provider returns null when it cannot serve the query.
        if cursor.is_null() {
            return Ok(());
        }

        let result = read_rows(&mut env, &cursor, visit);

        if let Err(e) = env.call_method(&cursor, "close", "()V", &[]) {
            warn!("Failed to close SMS cursor: {}", java_error(&mut env, e));
        }
        result
    }
}

fn read_rows(
    env: &mut JNIEnv,
    cursor: &JObject,
    visit: &mut dyn FnMut(StoreRow) -> Result<()>,
) -> Result<()> {
    let mut indices = [0i32; 4];
    for (slot, column) in indices.iter_mut().zip(PROJECTION) {
        *slot = column_index(env, cursor, column).map_err(|e| java_error(env, e))?;
    }

    loop {
        let has_next = env
            .call_method(cursor, "moveToNext", "()Z", &[])
            .and_then(|v| v.z())
            .map_err(|e| java_error(env, e))?;
        if !has_next {
            return Ok(());
        }

        let mut values = Vec::with_capacity(indices.len());
        for index in indices {
            values.push(read_column(env, cursor, index).map_err(|e| java_error(env, e))?);
        }
        let mut values = values.into_iter();
        let mut next = || values.next().unwrap_or(ColumnValue::Null);
        visit(StoreRow {
            id: next(),
            address: next(),
            body: next(),
            date: next(),
        })?;
    }
}

fn column_index(env: &mut JNIEnv, cursor: &JObject, column: &str) -> jni::errors::Result<i32> {
    let name = env.new_string(column)?;
    let index = env
        .call_method(
            cursor,
            "getColumnIndexOrThrow",
            "(Ljava/lang/String;)I",
            &[JValue::Object(&name)],
        )?
        .i()?;
    env.delete_local_ref(name)?;
    Ok(index)
}

fn read_column(env: &mut JNIEnv, cursor: &JObject, index: i32) -> jni::errors::Result<ColumnValue> {
    let args = [JValue::Int(index)];
    let field_type = env.call_method(cursor, "getType", "(I)I", &args)?.i()?;
    let value = match field_type {
        FIELD_TYPE_NULL => ColumnValue::Null,
        FIELD_TYPE_INTEGER => {
            ColumnValue::Integer(env.call_method(cursor, "getLong", "(I)J", &args)?.j()?)
        }
        FIELD_TYPE_FLOAT => {
            ColumnValue::Real(env.call_method(cursor, "getDouble", "(I)D", &args)?.d()?)
        }
        FIELD_TYPE_BLOB => {
            let obj = env.call_method(cursor, "getBlob", "(I)[B", &args)?.l()?;
            let array = JByteArray::from(obj);
            let bytes = env.convert_byte_array(&array)?;
            env.delete_local_ref(array)?;
            ColumnValue::Blob(bytes)
        }
        // FIELD_TYPE_STRING (3), and anything newer, reads as text
        _ => {
            let obj = env
                .call_method(cursor, "getString", "(I)Ljava/lang/String;", &args)?
                .l()?;
            if obj.is_null() {
                ColumnValue::Null
            } else {
                let jstr = JString::from(obj);
                let text: String = env.get_string(&jstr)?.into();
                env.delete_local_ref(jstr)?;
                ColumnValue::Text(text)
            }
        }
    };
    Ok(value)
}

fn string_array<'local, S: AsRef<str>>(
    env: &mut JNIEnv<'local>,
    items: &[S],
) -> jni::errors::Result<JObjectArray<'local>> {
    let array = env.new_object_array(items.len() as i32, "java/lang/String", JObject::null())?;
    for (i, item) in items.iter().enumerate() {
        let value = env.new_string(item.as_ref())?;
        env.set_object_array_element(&array, i as i32, &value)?;
        env.delete_local_ref(value)?;
    }
    Ok(array)
}

/// Turn a JNI failure into `QueryFailed`, keeping the Java exception message.
pub(crate) fn java_error(env: &mut JNIEnv, err: jni::errors::Error) -> Error {
    if !matches!(err, jni::errors::Error::JavaException) {
        return Error::query(err);
    }
    let Ok(throwable) = env.exception_occurred() else {
        return Error::query(err);
    };
    let _ = env.exception_clear();

    let message = env
        .call_method(&throwable, "toString", "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
        .and_then(|obj| {
            let jstr = JString::from(obj);
            env.get_string(&jstr).map(String::from)
        });
    match message {
        Ok(message) => Error::QueryFailed(message),
        Err(_) => Error::query(err),
    }
}
