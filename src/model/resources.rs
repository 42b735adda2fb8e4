//! The four administered resources.

use super::spec::{FieldSpec, FilterSpec, Format, Messages, ResourceSpec};

pub static ARTICLES: ResourceSpec = ResourceSpec {
    table: "articles",
    path_segment: "articles",
    item_key: "article",
    fields: &[
        FieldSpec::varchar("title", "标题").required().length(2, 45),
        FieldSpec::text("content", "内容"),
    ],
    whitelist: Some(&["title", "content"]),
    filters: &[FilterSpec::contains("title")],
    hidden: &[],
    messages: Messages {
        listed: "查询文章列表成功",
        fetched: "查询文章成功",
        created: "创建文章成功",
        updated: "更新文章成功",
        deleted: "删除文章成功",
        not_found: "文章不存在",
    },
};

pub static CATEGORIES: ResourceSpec = ResourceSpec {
    table: "categories",
    path_segment: "categories",
    item_key: "category",
    fields: &[
        FieldSpec::varchar("name", "名称").required().unique().length(2, 45),
        FieldSpec::integer("rank", "排序").required().minimum(0),
    ],
    whitelist: Some(&["name", "rank"]),
    filters: &[FilterSpec::contains("name")],
    hidden: &[],
    messages: Messages {
        listed: "查询分类列表成功",
        fetched: "查询分类成功",
        created: "创建分类成功",
        updated: "更新分类成功",
        deleted: "删除分类成功",
        not_found: "分类不存在",
    },
};

pub static USERS: ResourceSpec = ResourceSpec {
    table: "users",
    path_segment: "users",
    item_key: "user",
    fields: &[
        FieldSpec::varchar("email", "邮箱").required().unique().format(Format::Email),
        FieldSpec::varchar("username", "用户名").required().unique().length(2, 45),
        FieldSpec::varchar("password", "密码").required().length(6, 45),
        FieldSpec::varchar("nickname", "昵称").required().length(2, 45),
        FieldSpec::integer("sex", "性别").required().one_of(&[0, 1, 2]),
        FieldSpec::varchar("company", "公司"),
        FieldSpec::text("introduce", "简介"),
        FieldSpec::integer("role", "用户组").required().one_of(&[0, 100]),
        FieldSpec::varchar("avatar", "头像").format(Format::Url),
    ],
    whitelist: Some(&[
        "email",
        "username",
        "password",
        "nickname",
        "sex",
        "company",
        "introduce",
        "role",
        "avatar",
    ]),
    filters: &[
        FilterSpec::exact("email"),
        FilterSpec::exact("username"),
        FilterSpec::contains("nickname"),
        FilterSpec::exact("role"),
    ],
    hidden: &["password"],
    messages: Messages {
        listed: "查询用户列表成功",
        fetched: "查询用户成功",
        created: "创建用户成功",
        updated: "更新用户成功",
        deleted: "删除用户成功",
        not_found: "用户不存在",
    },
};

pub static SETTINGS: ResourceSpec = ResourceSpec {
    table: "settings",
    path_segment: "settings",
    item_key: "setting",
    fields: &[
        FieldSpec::varchar("title", "标题"),
        FieldSpec::text("content", "内容"),
    ],
    whitelist: None,
    filters: &[],
    hidden: &[],
    messages: Messages {
        listed: "查询系统设置成功",
        fetched: "查询系统设置成功",
        created: "创建系统设置成功",
        updated: "更新系统设置成功",
        deleted: "删除系统设置成功",
        not_found: "初始系统设置不存在，请运行种子文件",
    },
};

/// Resources served under `/:resource` with the full CRUD set.
pub static COLLECTIONS: [&ResourceSpec; 3] = [&ARTICLES, &CATEGORIES, &USERS];

/// Every table the service owns, in migration order.
pub static ALL: [&ResourceSpec; 4] = [&ARTICLES, &CATEGORIES, &USERS, &SETTINGS];

pub fn collection_by_path(segment: &str) -> Option<&'static ResourceSpec> {
    COLLECTIONS.iter().copied().find(|r| r.path_segment == segment)
}
