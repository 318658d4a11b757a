//! 도메인 정책(diff 절단 규칙, 리뷰 프롬프트 구성).

/// 텍스트를 최대 `limit` 문자(char)까지만 남긴다.
///
/// 정확히 `limit` 문자인 입력은 그대로 반환하고, 초과분은 오류 없이 버린다.
/// provider 입력 한도를 지키기 위한 손실 연산이다.
pub fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((cutoff, _)) => &text[..cutoff],
        None => text,
    }
}

/// diff를 리뷰 지시문 템플릿에 넣어 provider 프롬프트를 만든다.
pub fn build_prompt(diff: &str, max_chars: usize) -> String {
    let diff = truncate(diff, max_chars);

    let mut out = String::new();
    out.push_str(
        "You are an expert senior software engineer conducting a thorough code review. \
         Analyze the provided git diff and provide comprehensive feedback.\n\n",
    );
    out.push_str("<diff>\n");
    out.push_str(diff);
    if !diff.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</diff>\n\n");

    out.push_str(REVIEW_FOCUS);
    out.push_str(RESPONSE_FORMAT);
    out.push_str(SEVERITY_GUIDE);
    out
}

const REVIEW_FOCUS: &str = "\
**Review Focus Areas:**
1. **Language-Specific Best Practices**: First identify the programming language(s) in the diff, then apply that language's idioms and conventions
2. **Security Issues**: injection, XSS, authentication/authorization flaws, sensitive data exposure, insecure dependencies, hardcoded secrets
3. **Performance**: inefficient algorithms, memory leaks, N+1 queries, blocking operations, excessive API calls
4. **Code Quality**: duplication, excessive complexity, poor naming, missing documentation, overly long functions
5. **Maintainability**: tight coupling, lack of modularity, insufficient test coverage, unclear logic
6. **Style & Conventions**: inconsistent formatting, naming conventions, style guide violations
7. **Bugs & Edge Cases**: logic errors, race conditions, null handling, boundary conditions

";

const RESPONSE_FORMAT: &str = r#"**Response Format:**
Return ONLY a single JSON object. Do not wrap it in markdown code fences and do not add any text before or after it. Markdown is allowed inside string values.
{
  "summary": "A concise overview of the changes and overall code quality",
  "suggestions": [
    {
      "issue": "string describing one actionable issue, bug, or vulnerability",
      "severity": 1,
      "category": "security" | "performance" | "readability" | "maintainability" | "style" | "other",
      "filePath": "full file path from the diff, e.g. src/api/users.ts",
      "lineNumber": 45,
      "codeSnippet": "small snippet of the offending code",
      "recommendation": "specific, actionable advice on how to fix the issue"
    }
  ]
}
Every suggestion must contain all seven fields. Use an empty "suggestions" array when there is nothing actionable.

**Line Numbers & File Paths:**
- Use the line number from the new file version (the '+' lines in the diff)
- For issues spanning multiple lines, reference the first or most relevant line only

"#;

const SEVERITY_GUIDE: &str = "\
**Severity Guidelines (integer 1-5):**
- 1 (Critical): security vulnerabilities, data loss risks, breaking changes, major bugs
- 2 (Major): significant performance issues, violated best practices, poor error handling
- 3 (Moderate): code smells, maintainability concerns, missing edge case handling
- 4 (Minor): style inconsistencies, small refactoring opportunities, documentation gaps
- 5 (Trivial): nitpicks, optional improvements
";
